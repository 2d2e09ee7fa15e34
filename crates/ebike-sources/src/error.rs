//! Errors raised while locating and reading CSV sources.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
    #[error("unsupported manifest format: {} (expected .toml, .json or .yaml)", .0.display())]
    UnknownFormat(PathBuf),
}
