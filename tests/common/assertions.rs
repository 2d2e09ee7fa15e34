//! Custom assertion macros and helpers for ebike tests.
//!
//! Macros produce failure messages that name the offending bikes rather than
//! dumping whole entities.

use ebike_core::BikeEntity;
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Result set assertions
// ---------------------------------------------------------------------------

/// Assert that a result set holds exactly the named bikes, in order.
///
/// ```rust
/// assert_names!(results, ["C11", "Titan"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let results = &$results;
        let actual: Vec<&str> = results.iter().map(|b| b.name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        if actual != expected {
            panic!(
                "assert_names! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that every bike in a result set satisfies a predicate.
///
/// ```rust
/// assert_all_bikes!(results, |b| b.manufacturer == "Engwe");
/// ```
#[macro_export]
macro_rules! assert_all_bikes {
    ($results:expr, |$bike:ident| $cond:expr) => {{
        let results = &$results;
        let mut failing: Vec<&str> = Vec::new();
        for $bike in results.iter() {
            if !$cond {
                failing.push($bike.name.as_str());
            }
        }
        if !failing.is_empty() {
            panic!(
                "assert_all_bikes! failed: {} of {} bikes did not satisfy `{}`: {:?}",
                failing.len(),
                results.len(),
                stringify!($cond),
                failing
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Entity invariant helpers
// ---------------------------------------------------------------------------

/// Assert the invariants every normalised entity holds.
pub fn assert_well_formed(bike: &BikeEntity) {
    assert!(!bike.name.is_empty(), "bike without a name: {}", bike.id);
    assert!(
        bike.id.matches(ebike_core::normalizer::ID_SEPARATOR).count() >= 2,
        "id must join website, product id and language: {}",
        bike.id
    );
    assert!(!bike.manufacturer.is_empty(), "empty manufacturer: {}", bike.id);
    assert!(!bike.language.is_empty(), "empty language: {}", bike.id);
    if let Some(price) = bike.price {
        assert!(price.is_finite() && price >= 0.0, "bad price {price} on {}", bike.id);
    }
    assert!(
        bike.images.iter().all(|i| !i.trim().is_empty()),
        "blank image entry on {}",
        bike.id
    );
}

/// Assert that no two bikes share an id.
pub fn assert_unique_ids<'a>(bikes: impl IntoIterator<Item = &'a BikeEntity>) {
    let mut seen = HashSet::new();
    for bike in bikes {
        assert!(seen.insert(bike.id.as_str()), "duplicate id {}", bike.id);
    }
}
