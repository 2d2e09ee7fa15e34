//! Normalizer: maps [`RawRecord`](crate::RawRecord) rows into [`BikeEntity`](crate::BikeEntity) values.
//!
//! Normalisation is best-effort and never fails: a price that cannot be read
//! becomes `None`, a malformed image list falls back to comma splitting, and a
//! row without a name is dropped.

use crate::types::{BikeEntity, RawRecord, UNNAMED_BIKE};

/// Separator between the parts of a synthesised bike id.
pub const ID_SEPARATOR: char = '_';

const UNKNOWN_WEBSITE_ID: &str = "unknown";
const UNKNOWN_MANUFACTURER: &str = "Unknown";
const DEFAULT_LANGUAGE: &str = "en";
const PRICE_NOT_AVAILABLE: &str = "N/A";

/// Source-site label → display manufacturer.
static MANUFACTURERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Trek International" => "Trek",
    "Specialized USA" => "Specialized",
    "Cube Bikes" => "Cube",
    "Riese & Müller" => "Riese & Müller",
    "Haibike" => "Haibike",
    "Engwe US" => "Engwe",
    "Engwe EU" => "Engwe",
    "Fiido" => "Fiido",
    "Rad Power Bikes (US)" => "Rad Power Bikes",
    "Aventon" => "Aventon",
    "Lectric eBikes" => "Lectric",
};

/// Normalise a batch of raw records, preserving input order.
///
/// The position of each record in `records` is the product-id fallback used
/// for its id, so callers combining several sources should concatenate the
/// raw records before normalising.
pub fn normalize(records: &[RawRecord]) -> Vec<BikeEntity> {
    let bikes: Vec<BikeEntity> = records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| normalize_record(i, record))
        .collect();

    let unnamed = records.len() - bikes.len();
    if unnamed > 0 {
        tracing::debug!(unnamed, kept = bikes.len(), "dropped records without a name");
    }
    bikes
}

/// Normalise a single record found at `index` in its batch.
///
/// Returns `None` when the record has no usable name.
pub fn normalize_record(index: usize, record: &RawRecord) -> Option<BikeEntity> {
    let name = record.value("name").unwrap_or(UNNAMED_BIKE);
    if name == UNNAMED_BIKE {
        return None;
    }

    let text = |column: &str| record.value(column).unwrap_or_default().to_string();

    Some(BikeEntity {
        id: bike_id(index, record),
        name: name.to_string(),
        price: record.get("price").and_then(parse_price),
        description: text("description"),
        website: text("website"),
        manufacturer: canonical_manufacturer(record.value("website")),
        product_id: text("product_id"),
        language: record.value("language").unwrap_or(DEFAULT_LANGUAGE).to_string(),
        url: text("url"),
        crawl_date: text("crawl_date"),
        battery: text("battery"),
        motor_type: text("motor_type"),
        max_speed: text("max_speed"),
        range: text("range"),
        weight: text("weight"),
        max_load: text("max_load"),
        images: record.get("images").map(parse_images).unwrap_or_default(),
    })
}

/// `<website>_<product_id>_<language>`, falling back to `unknown`, the record
/// index and `en` for missing parts.
pub fn bike_id(index: usize, record: &RawRecord) -> String {
    let website = record.value("website").unwrap_or(UNKNOWN_WEBSITE_ID);
    let product_id = record
        .value("product_id")
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string());
    let language = record.value("language").unwrap_or(DEFAULT_LANGUAGE);

    format!("{website}{ID_SEPARATOR}{product_id}{ID_SEPARATOR}{language}")
}

/// Read a scraped price such as `"$1,299.00"` or `"€ 899"`.
///
/// Everything but digits and periods is discarded, then the longest leading
/// decimal number is read (`"1.299.00"` reads as `1.299`). Empty input, the
/// `N/A` marker and input without digits give `None`.
pub fn parse_price(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw == PRICE_NOT_AVAILABLE {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    leading_decimal(&cleaned)
}

fn leading_decimal(s: &str) -> Option<f64> {
    let int_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut end = int_end;
    if s[int_end..].starts_with('.') {
        let frac = &s[int_end + 1..];
        end = int_end + 1 + frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
    }

    let number = s[..end].trim_end_matches('.');
    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    number.parse().ok()
}

/// Read the `images` column: a JSON array of strings when it looks like one,
/// otherwise a comma-separated list. Empty entries are dropped.
pub fn parse_images(raw: &str) -> Vec<String> {
    if raw.starts_with('[') {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(images) => return images,
            Err(err) => tracing::trace!(%err, "images field is not a JSON string array"),
        }
    }

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Display manufacturer for a source-site label. Labels not in the table are
/// returned unchanged; a missing label gives `"Unknown"`.
pub fn canonical_manufacturer(website: Option<&str>) -> String {
    match website {
        Some(site) => MANUFACTURERS.get(site).copied().unwrap_or(site).to_string(),
        None => UNKNOWN_MANUFACTURER.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
