//! ebike-sources: CSV source discovery and loading for ebike.
//!
//! Sources are listed explicitly in a [`Manifest`] (read from a file or built
//! from a data directory) and read concurrently by a [`SourceLoader`], which
//! keeps the text of every file it has read for the rest of the session.

pub mod error;
pub mod loader;
pub mod manifest;

pub use error::SourceError;
pub use loader::{FailedSource, LoadReport, LoadedSource, SourceLoader};
pub use manifest::{Manifest, SourceEntry};
