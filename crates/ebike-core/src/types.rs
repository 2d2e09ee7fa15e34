//! Core types for ebike-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! ephemeral [`RawRecord`] produced by the CSV parser and the normalised
//! [`BikeEntity`] held by the catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to a bike whose source row had no usable name. Entities that
/// still carry this name after normalisation are dropped.
pub const UNNAMED_BIKE: &str = "Unnamed Bike";

/// One parsed CSV data row, keyed by (trimmed) header name.
///
/// Produced by [`crate::csv::parse_rows`] and consumed immediately by the
/// normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column value. A later value for the same column replaces the
    /// earlier one.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Raw value of a column, present even when empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of a column, treating an empty string the same as a missing column.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = RawRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// A normalised, display-ready bike listing.
///
/// Text attributes are passed through from the source row untouched; only
/// `price`, `images`, `manufacturer` and `id` are derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeEntity {
    /// `<website>_<product_id>_<language>`, stable across reloads.
    pub id: String,
    pub name: String,
    /// Numeric price with currency symbols and grouping stripped. `None` when
    /// the source had no price or it could not be read as a number.
    pub price: Option<f64>,
    pub description: String,
    pub website: String,
    /// Display manufacturer derived from `website`.
    pub manufacturer: String,
    pub product_id: String,
    pub language: String,
    pub url: String,
    pub crawl_date: String,
    pub battery: String,
    pub motor_type: String,
    pub max_speed: String,
    pub range: String,
    pub weight: String,
    pub max_load: String,
    pub images: Vec<String>,
}

impl BikeEntity {
    /// Price usable for filtering and display. A zero price counts as missing.
    pub fn listed_price(&self) -> Option<f64> {
        self.price.filter(|p| *p != 0.0)
    }

    /// First image, used as the card thumbnail.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
