//! Source manifests: the explicit list of CSV files that make up a catalog.
//!
//! A manifest is either read from a TOML/JSON/YAML file:
//!
//! ```toml
//! [[sources]]
//! path = "data/engwe_us_20250523.csv"
//!
//! [[sources]]
//! key  = "fiido"
//! path = "data/fiido-latest.csv"
//! ```
//!
//! or built by scanning a directory of `<site>_<YYYYMMDD>.csv` files.

use crate::error::SourceError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Manifest format for a file extension, matched case-insensitively.
fn manifest_format(path: &Path) -> Option<config::FileFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "toml" => Some(config::FileFormat::Toml),
        "json" => Some(config::FileFormat::Json),
        "yaml" | "yml" => Some(config::FileFormat::Yaml),
        _ => None,
    }
}

/// One CSV source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Site key such as `engwe_us`.
    pub key: String,
    pub path: PathBuf,
    /// Crawl date taken from the file name, when it carries one.
    pub date: Option<NaiveDate>,
}

impl SourceEntry {
    /// Derive key and date from a `<site>_<YYYYMMDD>.csv` file name. Names
    /// without a date suffix use the whole stem as key.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (key, date) = split_dated_stem(&stem);
        Self {
            key: key.to_string(),
            path,
            date,
        }
    }
}

fn split_dated_stem(stem: &str) -> (&str, Option<NaiveDate>) {
    if let Some((key, suffix)) = stem.rsplit_once('_') {
        if suffix.len() == 8 && !key.is_empty() {
            if let Ok(date) = NaiveDate::parse_from_str(suffix, "%Y%m%d") {
                return (key, Some(date));
            }
        }
    }
    (stem, None)
}

/// Ordered list of sources to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub sources: Vec<SourceEntry>,
}

#[derive(Deserialize)]
struct ManifestFile {
    #[serde(default)]
    sources: Vec<ManifestFileEntry>,
}

#[derive(Deserialize)]
struct ManifestFileEntry {
    path: PathBuf,
    #[serde(default)]
    key: Option<String>,
}

impl Manifest {
    pub fn new(sources: Vec<SourceEntry>) -> Self {
        Self { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Read a manifest file. Relative source paths are resolved against the
    /// manifest's own directory.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let format =
            manifest_format(path).ok_or_else(|| SourceError::UnknownFormat(path.to_path_buf()))?;

        let manifest_err = |source| SourceError::Manifest {
            path: path.to_path_buf(),
            source,
        };
        let file: ManifestFile = config::Config::builder()
            .add_source(config::File::from(path).format(format))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(manifest_err)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let sources = file
            .sources
            .into_iter()
            .map(|entry| {
                let mut source = SourceEntry::from_path(base.join(&entry.path));
                if let Some(key) = entry.key.filter(|k| !k.is_empty()) {
                    source.key = key;
                }
                source
            })
            .collect::<Vec<_>>();

        tracing::debug!(path = %path.display(), sources = sources.len(), "manifest read");
        Ok(Self { sources })
    }

    /// List the `*.csv` files of a directory, ordered by file name.
    pub async fn scan_dir(dir: &Path) -> Result<Self, SourceError> {
        let io_err = |source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
            if is_csv && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        tracing::debug!(dir = %dir.display(), files = paths.len(), "scanned data directory");
        Ok(Self {
            sources: paths.into_iter().map(SourceEntry::from_path).collect(),
        })
    }

    /// Keep only the newest file per site key, ordered by key. Undated files
    /// lose to dated ones; among equals the later entry wins.
    pub fn latest(self) -> Self {
        let mut by_key: BTreeMap<String, SourceEntry> = BTreeMap::new();
        for source in self.sources {
            match by_key.get(&source.key) {
                Some(existing) if existing.date > source.date => {}
                _ => {
                    by_key.insert(source.key.clone(), source);
                }
            }
        }
        Self {
            sources: by_key.into_values().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
