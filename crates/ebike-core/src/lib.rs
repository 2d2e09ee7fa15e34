//! ebike-core: e-bike catalog core library.
//!
//! This crate holds the pipeline that turns scraped CSV listings into
//! comparable bikes, plus the session-level operations run over them.
//!
//! # Architecture
//!
//! ```text
//! CSV text ──► csv ──► normalizer ──► Catalog ──► filter / sort / page
//!                                        │
//!                                        └──► Comparison
//! ```
//!
//! Everything here is synchronous and allocation-light; loading sources from
//! disk lives in `ebike-sources`.

pub mod catalog;
pub mod compare;
pub mod config;
pub mod csv;
pub mod normalizer;
pub mod types;

pub use catalog::{Catalog, Filters, Pagination, PriceRange, SortKey};
pub use compare::{Comparison, ComparisonTable};
pub use types::{BikeEntity, RawRecord, UNNAMED_BIKE};
