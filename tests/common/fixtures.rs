//! Fixture corpora: scraped CSV files as the crawler writes them.
//!
//! Rows are fixed-size arrays so every fixture row matches [`HEADER`].

use super::builders::encode_line;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 15] = [
    "name",
    "price",
    "description",
    "website",
    "product_id",
    "language",
    "url",
    "crawl_date",
    "battery",
    "motor_type",
    "max_speed",
    "range",
    "weight",
    "max_load",
    "images",
];

pub const ENGWE_US_ROWS: [[&str; 15]; 3] = [
    [
        "EP-2 Pro",
        "$1,299.00",
        "Folding fat tire e-bike, 750W peak",
        "Engwe US",
        "ep-2-pro",
        "en",
        "https://engwe-bikes.com/products/ep-2-pro",
        "2025-05-23",
        "48V 13Ah",
        "Rear hub",
        "28 mph",
        "75 miles",
        "29.5 kg",
        "150 kg",
        r#"["https://cdn.engwe.com/ep2-1.jpg","https://cdn.engwe.com/ep2-2.jpg"]"#,
    ],
    [
        "Engine Pro 2.0",
        "$1,499.00",
        "Torque sensor, dual suspension",
        "Engwe US",
        "engine-pro-2",
        "en",
        "https://engwe-bikes.com/products/engine-pro-2",
        "2025-05-23",
        "52V 16Ah",
        "Rear hub",
        "28 mph",
        "68 miles",
        "33 kg",
        "150 kg",
        "https://cdn.engwe.com/engine-1.jpg, https://cdn.engwe.com/engine-2.jpg",
    ],
    [
        "L20 Boost",
        "N/A",
        "Step-through commuter",
        "Engwe US",
        "l20-boost",
        "en",
        "https://engwe-bikes.com/products/l20-boost",
        "2025-05-23",
        "48V 13Ah",
        "Rear hub",
        "25 mph",
        "",
        "",
        "",
        "",
    ],
];

pub const FIIDO_ROWS: [[&str; 15]; 2] = [
    [
        "C11",
        "$999",
        "City commuter, \"lightweight\" frame",
        "Fiido",
        "c11",
        "en",
        "https://www.fiido.com/products/c11",
        "2025-05-22",
        "36V 12.8Ah",
        "Rear hub",
        "20 mph",
        "60 miles",
        "22 kg",
        "120 kg",
        "[]",
    ],
    [
        "Titan",
        "$1,599",
        "Cargo e-bike, 1000W",
        "Fiido",
        "titan",
        "en",
        "https://www.fiido.com/products/titan",
        "2025-05-22",
        "48V 23.4Ah",
        "Rear hub",
        "25 mph",
        "130 miles",
        "35 kg",
        "200 kg",
        "https://cdn.fiido.com/titan.jpg",
    ],
];

pub const AVENTON_ROWS: [[&str; 15]; 1] = [[
    "Level.2",
    "$1,799.00",
    "Commuter with torque sensor",
    "Aventon",
    "level-2",
    "en",
    "https://www.aventon.com/products/level-2",
    "2025-05-23",
    "48V 14Ah",
    "Rear hub",
    "28 mph",
    "60 miles",
    "28 kg",
    "136 kg",
    "",
]];

/// Total bikes across the named fixtures.
pub const FIXTURE_BIKES: usize = ENGWE_US_ROWS.len() + FIIDO_ROWS.len() + AVENTON_ROWS.len();

/// Header plus rows as CSV text.
pub fn csv_text<const N: usize>(rows: &[[&str; 15]; N]) -> String {
    let mut lines = vec![encode_line(&HEADER)];
    lines.extend(rows.iter().map(|r| encode_line(r)));
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn engwe_us_csv() -> String {
    csv_text(&ENGWE_US_ROWS)
}

pub fn fiido_csv() -> String {
    csv_text(&FIIDO_ROWS)
}

pub fn aventon_csv() -> String {
    csv_text(&AVENTON_ROWS)
}

/// A file with the defects real crawls produce: a short row, a row without a
/// name, CRLF line endings and blank lines.
pub const MALFORMED_CSV: &str = "name,price,website,product_id\r\n\
                                 \r\n\
                                 Good,$500,Fiido,good\r\n\
                                 Short,$600,Fiido\r\n\
                                 ,$700,Fiido,nameless\r\n\
                                 \r\n\
                                 Also Good,\"$1,200\",Lectric eBikes,also-good\r\n";

/// `n` synthetic rows across all mapped and one unmapped website.
pub fn corpus_high_volume(n: usize) -> String {
    const SITES: [&str; 5] = ["Engwe US", "Fiido", "Aventon", "Lectric eBikes", "Velotric"];
    let mut text = encode_line(&HEADER);
    text.push('\n');
    for i in 0..n {
        let name = format!("Model {i}");
        let price = format!("${},{:03}.00", 1 + i % 4, (i * 37) % 1000);
        let description = format!("Synthetic bike {i}, generated");
        let product_id = format!("p{i}");
        let row = [
            name.as_str(),
            price.as_str(),
            description.as_str(),
            SITES[i % SITES.len()],
            product_id.as_str(),
            "en",
            "",
            "2025-05-23",
            "48V",
            "Rear hub",
            "28 mph",
            "",
            "",
            "",
            "",
        ];
        text.push_str(&encode_line(&row));
        text.push('\n');
    }
    text
}

/// Write `files` into `dir`, returning their paths in the given order.
pub fn write_sources(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, text)| {
            let path = dir.join(name);
            std::fs::write(&path, text).expect("write fixture");
            path
        })
        .collect()
}
