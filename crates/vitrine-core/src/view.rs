//! Presentation port.
//!
//! The controller never touches markup. It drives an implementation of
//! [`CatalogView`]: the DOM adapter on the web, a recording fake in tests.
//! Every lookup behind this trait may come up empty (no search box, no badge,
//! catalog markup not rendered yet); implementations treat that as a no-op.

use crate::card::CardSlot;
use crate::config::FavoriteGlyphs;
use crate::favorites::{BadgeState, FavoriteSet};
use crate::state::{CategoryFilter, SortMode};

/// Everything the controller needs to change on screen.
pub trait CatalogView {
    /// Deactivate every page, then activate `page`.
    ///
    /// Returns `false` when no page carries that id.
    fn show_page(&mut self, page: &str) -> bool;

    /// Clear the active state of every navigation link, then set it on the
    /// links targeting `page`.
    fn highlight_nav(&mut self, page: &str);

    /// (Re)acquire the render container. Returns whether it exists now.
    ///
    /// Called each time the catalog page is shown.
    fn bind_container(&mut self) -> bool;

    /// Put every registered card, visible or not, into the fading state.
    fn mark_fading(&mut self);

    /// Empty the render container and append `order`, in order.
    ///
    /// Appended cards leave the fading state.
    fn replace_container(&mut self, order: &[CardSlot]);

    /// Set the favorite toggle inside the card at `slot`.
    fn set_card_favorite(&mut self, slot: CardSlot, active: bool, glyph: &str);

    /// Refresh every favorite toggle on the page from `favorites`.
    fn sync_favorite_controls(&mut self, favorites: &FavoriteSet, glyphs: &FavoriteGlyphs);

    /// Update the favorites counter and badge.
    fn update_badge(&mut self, badge: &BadgeState);

    /// Mark the sort and filter controls matching the current choice.
    fn highlight_controls(&mut self, sort: SortMode, filter: &CategoryFilter);

    /// Write `text` into the search input.
    fn set_search_text(&mut self, text: &str);
}
