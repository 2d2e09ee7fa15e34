//! Synthetic crawler output shared by the benches.

#![allow(dead_code)]

/// Column header written by the crawler.
pub const HEADER: &str = "name,price,description,website,product_id,language,url,crawl_date,\
                          battery,motor_type,max_speed,range,weight,max_load,images";

const SITES: [&str; 6] = [
    "Engwe US",
    "Fiido",
    "Aventon",
    "Lectric eBikes",
    "Rad Power Bikes (US)",
    "Velotric",
];

/// One data row with quoted commas, a JSON image list and a grouped price.
pub fn row(i: usize) -> String {
    format!(
        "Model {i},\"${},{:03}.00\",\"Commuter e-bike {i}, torque sensor\",{},p{i},en,\
         https://example.com/p{i},2025-05-23,48V 13Ah,Rear hub,28 mph,60 miles,25 kg,130 kg,\
         \"[\"\"https://cdn.example.com/{i}-1.jpg\"\",\"\"https://cdn.example.com/{i}-2.jpg\"\"]\"",
        1 + i % 4,
        (i * 37) % 1000,
        SITES[i % SITES.len()],
    )
}

/// Header plus `n` rows.
pub fn corpus(n: usize) -> String {
    let mut text = String::with_capacity((n + 1) * 256);
    text.push_str(HEADER);
    text.push('\n');
    for i in 0..n {
        text.push_str(&row(i));
        text.push('\n');
    }
    text
}
