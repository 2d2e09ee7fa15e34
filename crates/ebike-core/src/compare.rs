//! Side-by-side comparison of a small selection of bikes.

use crate::catalog::{format_amount, Catalog};
use crate::types::BikeEntity;

/// Selections smaller than this cannot be compared.
pub const MIN_COMPARE: usize = 2;

const MISSING: &str = "N/A";

/// Outcome of [`Comparison::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The selection is at capacity; nothing changed.
    Full,
    /// No bike with that id is in the catalog.
    Unknown,
}

/// The bikes picked for comparison, in pick order.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    selected: Vec<BikeEntity>,
    max: usize,
}

impl Comparison {
    pub fn new(max: usize) -> Self {
        Self {
            selected: Vec::new(),
            max: max.max(MIN_COMPARE),
        }
    }

    pub fn selected(&self) -> &[BikeEntity] {
        &self.selected
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|b| b.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.max
    }

    pub fn is_ready(&self) -> bool {
        self.selected.len() >= MIN_COMPARE
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Add the bike if it is not selected yet, remove it if it is.
    pub fn toggle(&mut self, catalog: &Catalog, id: &str) -> Toggle {
        let Some(bike) = catalog.get(id) else {
            return Toggle::Unknown;
        };

        if let Some(pos) = self.selected.iter().position(|b| b.id == id) {
            self.selected.remove(pos);
            Toggle::Removed
        } else if self.is_full() {
            Toggle::Full
        } else {
            self.selected.push(bike.clone());
            Toggle::Added
        }
    }

    /// Select bikes from a comma-separated id list such as the `bikes=` link
    /// parameter. Unknown and repeated ids are skipped; ids past capacity are
    /// ignored. Returns how many bikes were added.
    pub fn select_ids(&mut self, catalog: &Catalog, ids: &str) -> usize {
        let mut added = 0;
        for id in ids.split(',').map(str::trim).filter(|id| !id.is_empty()) {
            if self.is_full() {
                break;
            }
            if self.is_selected(id) {
                continue;
            }
            if let Some(bike) = catalog.get(id) {
                self.selected.push(bike.clone());
                added += 1;
            } else {
                tracing::debug!(id, "comparison id not in catalog");
            }
        }
        added
    }

    /// Lay the selection out as a specification table, one column per bike.
    pub fn table(&self) -> ComparisonTable {
        let header = self.selected.iter().map(|b| b.name.clone()).collect();
        let rows = SPEC_ROWS
            .iter()
            .map(|&(label, cell)| ComparisonRow {
                label,
                values: self.selected.iter().map(cell).collect(),
            })
            .collect();
        ComparisonTable { header, rows }
    }
}

impl Default for Comparison {
    fn default() -> Self {
        Self::new(4)
    }
}

/// A rendered comparison: bike names across the top, one row per attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub header: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

type Cell = fn(&BikeEntity) -> String;

const SPEC_ROWS: &[(&str, Cell)] = &[
    ("Manufacturer", |b: &BikeEntity| text(&b.manufacturer)),
    ("Price", |b: &BikeEntity| {
        b.listed_price()
            .map(format_amount)
            .unwrap_or_else(|| MISSING.to_string())
    }),
    ("Battery", |b: &BikeEntity| text(&b.battery)),
    ("Motor Type", |b: &BikeEntity| text(&b.motor_type)),
    ("Max Speed", |b: &BikeEntity| text(&b.max_speed)),
    ("Range", |b: &BikeEntity| text(&b.range)),
    ("Weight", |b: &BikeEntity| text(&b.weight)),
    ("Max Load", |b: &BikeEntity| text(&b.max_load)),
    ("Official Link", |b: &BikeEntity| text(&b.url)),
];

fn text(value: &str) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}
