//! Test builders: ergonomic constructors for `BikeEntity` and CSV text.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use ebike_core::{BikeEntity, Catalog};

// ---------------------------------------------------------------------------
// BikeBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`BikeEntity`] test fixtures.
///
/// ```rust
/// let bike = BikeBuilder::new("EP-2 Pro")
///     .website("Engwe US")
///     .price(1299.0)
///     .battery("48V 13Ah")
///     .build();
/// ```
pub struct BikeBuilder {
    bike: BikeEntity,
}

impl BikeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let product_id = name.to_lowercase().replace(' ', "-");
        Self {
            bike: BikeEntity {
                id: format!("test_{product_id}_en"),
                name,
                price: None,
                description: String::new(),
                website: "test".to_string(),
                manufacturer: "test".to_string(),
                product_id,
                language: "en".to_string(),
                url: String::new(),
                crawl_date: String::new(),
                battery: String::new(),
                motor_type: String::new(),
                max_speed: String::new(),
                range: String::new(),
                weight: String::new(),
                max_load: String::new(),
                images: Vec::new(),
            },
        }
    }

    /// Sets the website and the manufacturer to the same label, and rebuilds
    /// the id from it.
    pub fn website(mut self, website: impl Into<String>) -> Self {
        let website = website.into();
        self.bike.id = format!("{website}_{}_{}", self.bike.product_id, self.bike.language);
        self.bike.manufacturer = website.clone();
        self.bike.website = website;
        self
    }

    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.bike.manufacturer = manufacturer.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.bike.price = Some(price);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.bike.description = description.into();
        self
    }

    pub fn battery(mut self, battery: impl Into<String>) -> Self {
        self.bike.battery = battery.into();
        self
    }

    pub fn motor(mut self, motor_type: impl Into<String>) -> Self {
        self.bike.motor_type = motor_type.into();
        self
    }

    pub fn build(self) -> BikeEntity {
        self.bike
    }
}

/// Build a catalog directly from entities, skipping CSV parsing.
pub fn catalog_of(bikes: impl IntoIterator<Item = BikeEntity>) -> Catalog {
    Catalog::new(bikes.into_iter().collect())
}

// ---------------------------------------------------------------------------
// CsvBuilder
// ---------------------------------------------------------------------------

/// Builds CSV text row by row, quoting values that need it.
///
/// ```rust
/// let csv = CsvBuilder::new(&["name", "price"])
///     .row(&["C11", "$999"])
///     .build();
/// ```
pub struct CsvBuilder {
    lines: Vec<String>,
}

impl CsvBuilder {
    pub fn new(header: &[&str]) -> Self {
        Self {
            lines: vec![encode_line(header)],
        }
    }

    pub fn row(mut self, values: &[&str]) -> Self {
        self.lines.push(encode_line(values));
        self
    }

    pub fn build(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Encode one CSV line, quoting fields that contain commas or quotes.
pub fn encode_line(values: &[impl AsRef<str>]) -> String {
    values
        .iter()
        .map(|v| {
            let v = v.as_ref();
            if v.contains([',', '"']) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
