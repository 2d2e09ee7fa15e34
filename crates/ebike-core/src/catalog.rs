//! Catalog: the session's set of normalised bikes and the queries run over it.
//!
//! A [`Catalog`] is built once per session and handed to whatever needs it;
//! there is no process-wide instance. Queries borrow from the catalog and
//! return bikes in the requested order, and [`Pagination`] slices the result
//! for display.

use crate::csv::parse_rows;
use crate::normalizer::normalize;
use crate::types::{BikeEntity, RawRecord};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

/// Bikes without a price sort after every priced bike when sorting low→high.
const PRICE_LOW_FALLBACK: f64 = 999_999.0;

/// Errors from parsing user-supplied query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryParseError {
    #[error("invalid price range {0:?}, expected MIN-MAX")]
    InvalidPriceRange(String),
    #[error("unknown sort key {0:?}, expected name, price-low, price-high or manufacturer")]
    UnknownSortKey(String),
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl FromStr for PriceRange {
    type Err = QueryParseError;

    /// Parse `"MIN-MAX"`. Either bound may be left empty (`"2000-"`) to leave
    /// that side open.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QueryParseError::InvalidPriceRange(s.to_string());
        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let bound = |v: &str, open: f64| -> Result<f64, QueryParseError> {
            let v = v.trim();
            if v.is_empty() {
                Ok(open)
            } else {
                v.parse().map_err(|_| invalid())
            }
        };
        let range = PriceRange::new(bound(min, 0.0)?, bound(max, f64::INFINITY)?);
        if range.min > range.max {
            return Err(invalid());
        }
        Ok(range)
    }
}

/// Active catalog filters. Unset filters match every bike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub manufacturer: Option<String>,
    pub price_range: Option<PriceRange>,
    pub search: Option<String>,
}

impl Filters {
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into()).filter(|m: &String| !m.is_empty());
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturer.is_none() && self.price_range.is_none() && self.search.is_none()
    }

    /// Whether `bike` passes every active filter.
    ///
    /// The price filter only applies to bikes that have a price; unpriced bikes
    /// always pass it. Search is a case-insensitive substring match over name,
    /// description, manufacturer, battery and motor.
    pub fn matches(&self, bike: &BikeEntity) -> bool {
        if let Some(m) = &self.manufacturer {
            if bike.manufacturer != *m {
                return false;
            }
        }

        if let (Some(range), Some(price)) = (&self.price_range, bike.listed_price()) {
            if !range.contains(price) {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let haystack = [
                bike.name.as_str(),
                bike.description.as_str(),
                bike.manufacturer.as_str(),
                bike.battery.as_str(),
                bike.motor_type.as_str(),
            ]
            .join(" ")
            .to_lowercase();
            if !haystack.contains(&term.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Manufacturer,
}

impl SortKey {
    pub fn compare(&self, a: &BikeEntity, b: &BikeEntity) -> Ordering {
        match self {
            SortKey::Name => cmp_text(&a.name, &b.name),
            SortKey::PriceLow => {
                let price = |bike: &BikeEntity| bike.listed_price().unwrap_or(PRICE_LOW_FALLBACK);
                price(a).total_cmp(&price(b))
            }
            SortKey::PriceHigh => {
                let price = |bike: &BikeEntity| bike.listed_price().unwrap_or(0.0);
                price(b).total_cmp(&price(a))
            }
            SortKey::Manufacturer => cmp_text(&a.manufacturer, &b.manufacturer),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

impl FromStr for SortKey {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "manufacturer" => Ok(SortKey::Manufacturer),
            other => Err(QueryParseError::UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::PriceLow => write!(f, "price-low"),
            SortKey::PriceHigh => write!(f, "price-high"),
            SortKey::Manufacturer => write!(f, "manufacturer"),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// All bikes loaded for the current session, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    bikes: Vec<BikeEntity>,
}

/// Counts shown next to a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub results: usize,
    pub manufacturers: usize,
}

impl Catalog {
    pub fn new(bikes: Vec<BikeEntity>) -> Self {
        Self { bikes }
    }

    /// Parse and normalise several CSV documents as one batch.
    ///
    /// Raw rows from every document are concatenated before normalisation, so
    /// the positional id fallback counts across the whole batch.
    pub fn from_csv_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<RawRecord> = texts
            .into_iter()
            .flat_map(|text| parse_rows(text.as_ref()))
            .collect();
        let bikes = normalize(&raw);
        tracing::debug!(rows = raw.len(), bikes = bikes.len(), "catalog built");
        Self { bikes }
    }

    pub fn bikes(&self) -> &[BikeEntity] {
        &self.bikes
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }

    /// First bike with the given id.
    pub fn get(&self, id: &str) -> Option<&BikeEntity> {
        self.bikes.iter().find(|b| b.id == id)
    }

    /// Distinct manufacturer names, sorted.
    pub fn manufacturers(&self) -> Vec<&str> {
        self.bikes
            .iter()
            .map(|b| b.manufacturer.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Bikes passing `filters`, ordered by `sort`. Ties keep load order.
    pub fn query(&self, filters: &Filters, sort: SortKey) -> Vec<&BikeEntity> {
        let mut hits: Vec<&BikeEntity> = self.bikes.iter().filter(|b| filters.matches(b)).collect();
        hits.sort_by(|a, b| sort.compare(a, b));
        tracing::debug!(total = self.bikes.len(), hits = hits.len(), %sort, "catalog query");
        hits
    }

    pub fn summary(results: &[&BikeEntity]) -> Summary {
        Summary {
            results: results.len(),
            manufacturers: results
                .iter()
                .map(|b| b.manufacturer.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// How many page links are shown on each side of the current page.
const PAGE_WINDOW_RADIUS: usize = 2;

/// One page of a result list. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
    total_items: usize,
}

impl Pagination {
    /// Out-of-range page numbers are clamped to the first or last page.
    pub fn new(total_items: usize, per_page: usize, page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page).max(1);
        Self {
            page: page.clamp(1, total_pages),
            per_page,
            total_items,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Index range of the current page within the full result list.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    /// Page numbers to offer as direct links around the current page.
    pub fn window(&self) -> RangeInclusive<usize> {
        let start = self.page.saturating_sub(PAGE_WINDOW_RADIUS).max(1);
        let end = (self.page + PAGE_WINDOW_RADIUS).min(self.total_pages());
        start..=end
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.range()).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Price display
// ---------------------------------------------------------------------------

/// Card label for a price: `$1,299`, or a placeholder when there is none.
pub fn display_price(price: Option<f64>) -> String {
    match price.filter(|p| *p != 0.0) {
        Some(p) => format_amount(p),
        None => "Price not available".to_string(),
    }
}

/// `$` plus the amount with thousands separators and at most three decimals,
/// trailing zeros removed.
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if amount < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
