//! Filter → sort: which cards are visible, and in what order.
//!
//! Pure function of the registry and the view state. Rendering the result is
//! the controller's job.

use crate::card::{CardRegistry, CardSlot};
use crate::state::{SortMode, ViewState};

/// Compute the visible cards in display order.
///
/// 1. Keep cards whose lower-cased title contains the trimmed, lower-cased
///    search text (skipped when the search text is blank).
/// 2. Keep cards whose category equals the filter (skipped for "all").
/// 3. Stable-sort by price for the price modes; unparsable prices go last.
#[must_use]
pub fn visible_cards(registry: &CardRegistry, state: &ViewState) -> Vec<CardSlot> {
    let query = state.query();
    let mut visible: Vec<CardSlot> = registry
        .slots()
        .filter(|&slot| {
            let Some(card) = registry.get(slot) else {
                return false;
            };
            let matches_query = query
                .as_deref()
                .is_none_or(|q| card.title.to_lowercase().contains(q));
            matches_query && state.filter.admits(&card.category)
        })
        .collect();

    let price = |slot: CardSlot| registry.get(slot).map(|c| c.price);
    match state.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => visible.sort_by(|&a, &b| match (price(a), price(b)) {
            (Some(pa), Some(pb)) => pa.cmp_ascending(pb),
            _ => core::cmp::Ordering::Equal,
        }),
        SortMode::PriceDesc => visible.sort_by(|&a, &b| match (price(a), price(b)) {
            (Some(pa), Some(pb)) => pa.cmp_descending(pb),
            _ => core::cmp::Ordering::Equal,
        }),
    }
    visible
}
