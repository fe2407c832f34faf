//! Test-only helpers for building inboxes and registries.

use std::sync::Arc;

use crate::core::item::Item;
use crate::core::primes::TrialDivision;
use crate::core::registry::LevelRegistry;
use crate::io::levels::LevelCatalog;

/// Numeric items in order.
pub fn nums(values: &[i64]) -> Vec<Item> {
    values.iter().copied().map(Item::Number).collect()
}

/// One letter item per character of `text`.
pub fn letters(text: &str) -> Vec<Item> {
    text.chars().map(Item::Letter).collect()
}

/// Registry over the bundled catalog with trial-division factoring.
pub fn bundled_registry() -> LevelRegistry {
    let catalog = LevelCatalog::bundled().expect("bundled catalog");
    LevelRegistry::build(&catalog, Arc::new(TrialDivision))
}
