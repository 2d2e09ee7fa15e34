//! Loader: reads the CSV text of every manifest source.
//!
//! Sources are read concurrently. A source that fails to load is logged and
//! reported, and the remaining sources still load. File contents are cached
//! per path for the lifetime of the loader.

use crate::error::SourceError;
use crate::manifest::{Manifest, SourceEntry};
use ebike_core::Catalog;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A source whose text was read.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub source: SourceEntry,
    pub text: Arc<str>,
}

/// A source that could not be read. Entries repeating the same path share
/// one error.
#[derive(Debug, Clone)]
pub struct FailedSource {
    pub source: SourceEntry,
    pub error: Arc<SourceError>,
}

/// Outcome of loading a manifest, in manifest order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedSource>,
    pub failed: Vec<FailedSource>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reads and caches CSV sources.
#[derive(Debug, Default)]
pub struct SourceLoader {
    cache: HashMap<PathBuf, Arc<str>>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached files.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Text of a single CSV file, from the cache when already read.
    pub async fn load_text(&mut self, path: &Path) -> Result<Arc<str>, SourceError> {
        if let Some(text) = self.cache.get(path) {
            return Ok(Arc::clone(text));
        }
        let text = read_csv(path).await?;
        self.cache.insert(path.to_path_buf(), Arc::clone(&text));
        Ok(text)
    }

    /// Read every source in the manifest. Uncached sources are read
    /// concurrently; failures do not stop the others.
    pub async fn load_all(&mut self, manifest: &Manifest) -> LoadReport {
        let mut seen = HashSet::new();
        let pending: Vec<&Path> = manifest
            .sources
            .iter()
            .map(|s| s.path.as_path())
            .filter(|p| !self.cache.contains_key(*p) && seen.insert(*p))
            .collect();

        let results = join_all(pending.iter().map(|p| read_csv(p))).await;

        let mut errors: HashMap<&Path, Arc<SourceError>> = HashMap::new();
        for (path, result) in pending.into_iter().zip(results) {
            match result {
                Ok(text) => {
                    self.cache.insert(path.to_path_buf(), text);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "failed to load source");
                    errors.insert(path, Arc::new(error));
                }
            }
        }

        let mut report = LoadReport::default();
        for source in &manifest.sources {
            if let Some(text) = self.cache.get(&source.path) {
                report.loaded.push(LoadedSource {
                    source: source.clone(),
                    text: Arc::clone(text),
                });
            } else if let Some(error) = errors.get(source.path.as_path()) {
                report.failed.push(FailedSource {
                    source: source.clone(),
                    error: Arc::clone(error),
                });
            }
        }
        report
    }

    /// Load every source and build one catalog from all that could be read.
    pub async fn load_catalog(&mut self, manifest: &Manifest) -> (Catalog, LoadReport) {
        let report = self.load_all(manifest).await;
        let catalog = Catalog::from_csv_texts(report.loaded.iter().map(|l| &l.text));
        tracing::info!(
            sources = report.loaded.len(),
            failed = report.failed.len(),
            bikes = catalog.len(),
            "catalog loaded"
        );
        (catalog, report)
    }
}

async fn read_csv(path: &Path) -> Result<Arc<str>, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(Arc::from(text))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
