//! DOM implementation of [`CatalogView`].
//!
//! Element handles are captured once at startup, except the render
//! container, which is looked up again every time the catalog is shown.
//! Every lookup may miss; a miss turns the operation into a no-op.

use vitrine_core::{
    BadgeState, CardRegistry, CardSlot, CatalogView, CategoryFilter, FavoriteGlyphs, FavoriteSet,
    ProductCard, SortMode,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::config::DomSelectors;

/// Every element matching `selector` under `document`, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Capture the registry and the card elements backing it.
pub(crate) fn scan_cards(document: &Document, selectors: &DomSelectors) -> (CardRegistry, Vec<Element>) {
    let elements = query_all(document, &selectors.card);
    let cards = elements
        .iter()
        .map(|el| {
            let attr = |name: &str| el.get_attribute(name).unwrap_or_default();
            let title = query_in(el, &selectors.title)
                .and_then(|t| t.text_content())
                .unwrap_or_default();
            ProductCard::from_markup(
                &attr("data-id"),
                &title,
                &attr("data-category"),
                &attr("data-price"),
            )
        })
        .collect();
    (CardRegistry::new(cards), elements)
}

/// The storefront as seen by the controller.
pub(crate) struct DomView {
    document: Document,
    selectors: DomSelectors,
    cards: Vec<Element>,
    pages: Vec<Element>,
    nav_links: Vec<Element>,
    sort_buttons: Vec<Element>,
    filter_buttons: Vec<Element>,
    search_input: Option<HtmlInputElement>,
    badge: Option<HtmlElement>,
    counter: Option<Element>,
    container: Option<Element>,
}

impl DomView {
    pub(crate) fn new(document: Document, selectors: DomSelectors, cards: Vec<Element>) -> Self {
        let pages = query_all(&document, &selectors.page);
        let nav_links = query_all(&document, &selectors.nav_link);
        let sort_buttons = query_all(&document, &selectors.sort_button);
        let filter_buttons = query_all(&document, &selectors.filter_button);
        let search_input = document
            .get_element_by_id(&selectors.search_input_id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let badge = document
            .get_element_by_id(&selectors.badge_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let counter = document.get_element_by_id(&selectors.counter_id);
        Self {
            document,
            selectors,
            cards,
            pages,
            nav_links,
            sort_buttons,
            filter_buttons,
            search_input,
            badge,
            counter,
            container: None,
        }
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn selectors(&self) -> &DomSelectors {
        &self.selectors
    }

    pub(crate) fn cards(&self) -> &[Element] {
        &self.cards
    }

    pub(crate) fn nav_links(&self) -> &[Element] {
        &self.nav_links
    }

    pub(crate) fn sort_buttons(&self) -> &[Element] {
        &self.sort_buttons
    }

    pub(crate) fn filter_buttons(&self) -> &[Element] {
        &self.filter_buttons
    }

    pub(crate) fn search_input(&self) -> Option<&HtmlInputElement> {
        self.search_input.as_ref()
    }

    /// The favorite toggle inside the card at `slot`.
    pub(crate) fn favorite_control(&self, slot: CardSlot) -> Option<HtmlElement> {
        self.cards
            .get(slot.0)
            .and_then(|card| query_in(card, &self.selectors.favorite_toggle))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn paint_toggle(&self, toggle: &Element, active: bool, glyph: &str) {
        toggle.set_text_content(Some(glyph));
        set_class(toggle, &self.selectors.active_class, active);
    }
}

impl CatalogView for DomView {
    fn show_page(&mut self, page: &str) -> bool {
        for section in &self.pages {
            set_class(section, &self.selectors.active_class, false);
        }
        match self.document.get_element_by_id(page) {
            Some(target) => {
                set_class(&target, &self.selectors.active_class, true);
                true
            }
            None => false,
        }
    }

    fn highlight_nav(&mut self, page: &str) {
        for link in &self.nav_links {
            set_class(link, &self.selectors.active_class, false);
        }
        // Any anchor pointing at the page, not only the nav set.
        let href = format!("#{page}");
        for anchor in query_all(&self.document, "a[href]") {
            if anchor.get_attribute("href").as_deref() == Some(href.as_str()) {
                set_class(&anchor, &self.selectors.active_class, true);
            }
        }
    }

    fn bind_container(&mut self) -> bool {
        self.container = self.document.get_element_by_id(&self.selectors.container_id);
        self.container.is_some()
    }

    fn mark_fading(&mut self) {
        for card in &self.cards {
            set_class(card, &self.selectors.fading_class, true);
        }
    }

    fn replace_container(&mut self, order: &[CardSlot]) {
        let Some(container) = &self.container else {
            return;
        };
        container.set_inner_html("");
        for slot in order {
            if let Some(card) = self.cards.get(slot.0) {
                let _ = container.append_child(card);
                set_class(card, &self.selectors.fading_class, false);
            }
        }
    }

    fn set_card_favorite(&mut self, slot: CardSlot, active: bool, glyph: &str) {
        if let Some(toggle) = self
            .cards
            .get(slot.0)
            .and_then(|card| query_in(card, &self.selectors.favorite_toggle))
        {
            self.paint_toggle(&toggle, active, glyph);
        }
    }

    fn sync_favorite_controls(&mut self, favorites: &FavoriteSet, glyphs: &FavoriteGlyphs) {
        for toggle in query_all(&self.document, &self.selectors.favorite_toggle) {
            let active = toggle
                .get_attribute("data-id")
                .is_some_and(|id| favorites.contains(&id));
            let glyph = if active { &glyphs.active } else { &glyphs.inactive };
            self.paint_toggle(&toggle, active, glyph);
        }
    }

    fn update_badge(&mut self, badge: &BadgeState) {
        if let Some(counter) = &self.counter {
            counter.set_text_content(Some(&badge.count.to_string()));
        }
        if let Some(el) = &self.badge {
            let _ = el.set_attribute("aria-label", &badge.label);
            let _ = el.style().set_property("background-color", &badge.color);
        }
    }

    fn highlight_controls(&mut self, sort: SortMode, filter: &CategoryFilter) {
        for button in &self.sort_buttons {
            let on = button.get_attribute("data-sort").as_deref() == Some(sort.as_str());
            set_class(button, &self.selectors.active_class, on);
        }
        for button in &self.filter_buttons {
            let on = button.get_attribute("data-category").as_deref() == Some(filter.as_str());
            set_class(button, &self.selectors.active_class, on);
        }
    }

    fn set_search_text(&mut self, text: &str) {
        if let Some(input) = &self.search_input {
            input.set_value(text);
        }
    }
}
