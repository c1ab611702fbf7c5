//! Card sets used across tests.

use vitrine_core::{CardRegistry, ProductCard};

/// The two-card catalog from the product brief:
/// `1` in `a` at 10, `2` in `b` at 5.
#[must_use]
pub fn scenario_cards() -> CardRegistry {
    CardRegistry::new(vec![
        ProductCard::from_markup("1", "First item", "a", "10"),
        ProductCard::from_markup("2", "Second item", "b", "5"),
    ])
}

/// A small phone-accessory shop, in markup order.
#[must_use]
pub fn phone_shop() -> CardRegistry {
    CardRegistry::new(vec![
        ProductCard::from_markup("ip15", "iPhone 15", "phones", "79990"),
        ProductCard::from_markup("gs24", "Galaxy S24", "phones", "74990.50"),
        ProductCard::from_markup("case-ip15", "Чехол для iPhone 15", "cases", "1490"),
        ProductCard::from_markup("glass", "Защитное стекло", "accessories", "590"),
        ProductCard::from_markup("px8", "Pixel 8", "phones", "59990"),
        ProductCard::from_markup("case-gs24", "Чехол Galaxy S24", "cases", "1490"),
        ProductCard::from_markup("cable", "USB-C кабель", "accessories", "по запросу"),
    ])
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(registry: &CardRegistry) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for card in registry.all() {
        if !seen.contains(&card.category) {
            seen.push(card.category.clone());
        }
    }
    seen
}
