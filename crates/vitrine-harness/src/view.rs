//! In-memory stand-in for the storefront markup.
//!
//! [`RecordingView`] keeps just enough of a page to observe what the
//! controller did: which page is active, which links and controls are
//! highlighted, what sits in the render container, and how each card's
//! favorite toggle looks.

use vitrine_core::{
    BadgeState, CardRegistry, CardSlot, CatalogView, CategoryFilter, FavoriteGlyphs, FavoriteSet,
    SortMode,
};

/// One card element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeCard {
    pub id: String,
    pub fading: bool,
    /// `None` when the card has no favorite toggle.
    pub favorite: Option<FakeToggle>,
}

/// A favorite toggle's visible state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FakeToggle {
    pub active: bool,
    pub glyph: String,
}

/// A control carrying a value attribute and an active class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeControl {
    pub value: String,
    pub active: bool,
}

impl FakeControl {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            active: false,
        }
    }
}

/// Recording implementation of [`CatalogView`].
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub pages: Vec<String>,
    pub active_page: Option<String>,
    pub nav_links: Vec<FakeControl>,
    pub sort_controls: Vec<FakeControl>,
    pub filter_controls: Vec<FakeControl>,
    pub cards: Vec<FakeCard>,
    /// Whether the render container exists in the markup right now.
    pub container_in_markup: bool,
    /// Bound container contents; `None` until first bound.
    pub container: Option<Vec<CardSlot>>,
    /// `None` when the page has no search box.
    pub search_box: Option<String>,
    /// `None` when the page has no badge.
    pub badge: Option<BadgeState>,
    pub has_badge: bool,
    /// Number of container swaps performed.
    pub renders: usize,
}

impl RecordingView {
    /// Storefront with home and catalog pages, header and footer links to
    /// both, sort and filter controls, a search box, a badge, and one card
    /// element per registry entry.
    #[must_use]
    pub fn storefront(registry: &CardRegistry, categories: &[&str]) -> Self {
        let mut filter_controls = vec![FakeControl::new("all")];
        filter_controls.extend(categories.iter().map(|c| FakeControl::new(c)));
        Self {
            pages: vec!["home".into(), "catalog".into()],
            active_page: None,
            nav_links: ["#home", "#catalog", "#home", "#catalog"]
                .into_iter()
                .map(FakeControl::new)
                .collect(),
            sort_controls: ["default", "price-asc", "price-desc"]
                .into_iter()
                .map(FakeControl::new)
                .collect(),
            filter_controls,
            cards: registry
                .all()
                .iter()
                .map(|card| FakeCard {
                    id: card.id.clone(),
                    fading: false,
                    favorite: Some(FakeToggle::default()),
                })
                .collect(),
            container_in_markup: true,
            container: None,
            search_box: Some(String::new()),
            badge: None,
            has_badge: true,
            renders: 0,
        }
    }

    /// Drop the search box from the markup.
    #[must_use]
    pub fn without_search(mut self) -> Self {
        self.search_box = None;
        self
    }

    /// Drop the favorites badge from the markup.
    #[must_use]
    pub fn without_badge(mut self) -> Self {
        self.has_badge = false;
        self
    }

    /// The render container only appears once markup for it is inserted.
    #[must_use]
    pub fn without_container(mut self) -> Self {
        self.container_in_markup = false;
        self
    }

    /// Remove the favorite toggle from the card carrying `id`.
    #[must_use]
    pub fn without_toggle(mut self, id: &str) -> Self {
        for card in self.cards.iter_mut().filter(|c| c.id == id) {
            card.favorite = None;
        }
        self
    }

    /// Ids currently in the render container, in order.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<String> {
        self.container
            .iter()
            .flatten()
            .filter_map(|slot| self.cards.get(slot.0).map(|c| c.id.clone()))
            .collect()
    }

    /// Hrefs of highlighted navigation links.
    #[must_use]
    pub fn active_links(&self) -> Vec<String> {
        active_values(&self.nav_links)
    }

    #[must_use]
    pub fn active_sort(&self) -> Vec<String> {
        active_values(&self.sort_controls)
    }

    #[must_use]
    pub fn active_filter(&self) -> Vec<String> {
        active_values(&self.filter_controls)
    }

    /// The toggle of the card carrying `id`.
    #[must_use]
    pub fn toggle(&self, id: &str) -> Option<&FakeToggle> {
        self.cards
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.favorite.as_ref())
    }
}

fn active_values(controls: &[FakeControl]) -> Vec<String> {
    controls
        .iter()
        .filter(|c| c.active)
        .map(|c| c.value.clone())
        .collect()
}

impl CatalogView for RecordingView {
    fn show_page(&mut self, page: &str) -> bool {
        let found = self.pages.iter().any(|p| p == page);
        self.active_page = found.then(|| page.to_string());
        found
    }

    fn highlight_nav(&mut self, page: &str) {
        let href = format!("#{page}");
        for link in &mut self.nav_links {
            link.active = link.value == href;
        }
    }

    fn bind_container(&mut self) -> bool {
        if !self.container_in_markup {
            self.container = None;
        } else if self.container.is_none() {
            self.container = Some(Vec::new());
        }
        self.container_in_markup
    }

    fn mark_fading(&mut self) {
        for card in &mut self.cards {
            card.fading = true;
        }
    }

    fn replace_container(&mut self, order: &[CardSlot]) {
        let Some(container) = self.container.as_mut() else {
            return;
        };
        container.clear();
        container.extend_from_slice(order);
        for slot in order {
            if let Some(card) = self.cards.get_mut(slot.0) {
                card.fading = false;
            }
        }
        self.renders += 1;
    }

    fn set_card_favorite(&mut self, slot: CardSlot, active: bool, glyph: &str) {
        if let Some(toggle) = self
            .cards
            .get_mut(slot.0)
            .and_then(|c| c.favorite.as_mut())
        {
            toggle.active = active;
            toggle.glyph = glyph.to_string();
        }
    }

    fn sync_favorite_controls(&mut self, favorites: &FavoriteSet, glyphs: &FavoriteGlyphs) {
        for card in &mut self.cards {
            let active = favorites.contains(&card.id);
            if let Some(toggle) = card.favorite.as_mut() {
                toggle.active = active;
                toggle.glyph = if active {
                    glyphs.active.clone()
                } else {
                    glyphs.inactive.clone()
                };
            }
        }
    }

    fn update_badge(&mut self, badge: &BadgeState) {
        if self.has_badge {
            self.badge = Some(badge.clone());
        }
    }

    fn highlight_controls(&mut self, sort: SortMode, filter: &CategoryFilter) {
        for control in &mut self.sort_controls {
            control.active = control.value == sort.as_str();
        }
        for control in &mut self.filter_controls {
            control.active = control.value == filter.as_str();
        }
    }

    fn set_search_text(&mut self, text: &str) {
        if let Some(search) = self.search_box.as_mut() {
            *search = text.to_string();
        }
    }
}
