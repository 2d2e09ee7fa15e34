//! Configuration types for ebike.
//!
//! [`Config::load`] reads `~/.config/ebike/config.toml` (or an explicit path),
//! creating the default file with hardcoded defaults if it does not yet exist.
//! `EBIKE_<SECTION>__<KEY>` environment variables override file values.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use crate::catalog::SortKey;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[catalog]
items_per_page = 12
default_sort   = "name"

[compare]
max_selection = 4

[sources]
data_dir    = "data"
latest_only = true
"#;

const ENV_PREFIX: &str = "EBIKE";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// `[catalog]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default)]
    pub default_sort: SortKey,
}

fn default_items_per_page() -> usize { 12 }

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            default_sort: SortKey::default(),
        }
    }
}

/// `[compare]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_max_selection")]
    pub max_selection: usize,
}

fn default_max_selection() -> usize { 4 }

impl Default for CompareConfig {
    fn default() -> Self {
        Self { max_selection: default_max_selection() }
    }
}

/// `[sources]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Directory scanned for `<site>_<YYYYMMDD>.csv` files when no manifest
    /// is given.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Explicit source manifest; takes precedence over `data_dir`.
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    /// Keep only the newest file per site when scanning `data_dir`.
    #[serde(default = "default_latest_only")]
    pub latest_only: bool,
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_latest_only() -> bool { true }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            manifest: None,
            latest_only: default_latest_only(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered as defaults → file → environment.
    ///
    /// With `path = None` the user config file is used, and created with the
    /// defaults if it does not exist. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => {
                let p = config_path();
                if !p.exists() {
                    if let Some(parent) = p.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&p, DEFAULT_CONFIG.trim_start())?;
                }
                (p, false)
            }
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("ebike")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
