//! End-to-end catalog scenarios driven through the simulator.
//!
//! # Running Tests
//!
//! ```sh
//! cargo test -p vitrine-harness --test catalog_scenarios
//! VITRINE_LOG=debug cargo test -p vitrine-harness --test catalog_scenarios
//! ```

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use vitrine_core::{
    CardSlot, CatalogConfig, CategoryFilter, MemoryStore, PreferenceStore, SortMode, UiEvent,
};
use vitrine_harness::{CatalogSimulator, RecordingView, fixtures, init_test_logging};

const FADE: Duration = Duration::from_millis(200);

fn open_catalog(sim: &mut CatalogSimulator) {
    sim.send(UiEvent::NavClicked("#catalog".into()));
    sim.settle();
}

// ============================================================================
// Product brief scenarios
// ============================================================================

#[test]
fn two_card_scenario() {
    init_test_logging();
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    assert_eq!(sim.view().rendered_ids(), ["1", "2"]);

    sim.send(UiEvent::FilterClicked("a".into()));
    sim.settle();
    assert_eq!(sim.view().rendered_ids(), ["1"]);

    sim.send(UiEvent::SortClicked("price-asc".into()));
    sim.send(UiEvent::FilterClicked("all".into()));
    sim.settle();
    assert_eq!(sim.view().rendered_ids(), ["2", "1"]);

    sim.send(UiEvent::FavoriteClicked("1".into()));
    assert_eq!(sim.controller().favorites().ids(), ["1"]);
    sim.send(UiEvent::FavoriteClicked("1".into()));
    assert!(sim.controller().favorites().is_empty());
}

#[test]
fn first_catalog_visit_binds_and_renders_current_selection() {
    init_test_logging();
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();

    // Chosen while still on the home page: persisted, nothing rendered.
    sim.send(UiEvent::FilterClicked("cases".into()));
    sim.send(UiEvent::SortClicked("price-desc".into()));
    assert!(!sim.controller().container_bound());
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.view().container, None);

    sim.send(UiEvent::GoToCatalog);
    assert!(sim.controller().container_bound());
    sim.settle();
    assert_eq!(sim.view().rendered_ids(), ["case-ip15", "case-gs24"]);
    assert_eq!(sim.view().active_page.as_deref(), Some("catalog"));
}

// ============================================================================
// Render timing
// ============================================================================

#[test]
fn render_waits_for_fade_delay() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    sim.send(UiEvent::NavClicked("#catalog".into()));

    assert!(sim.view().cards.iter().all(|c| c.fading));
    sim.advance(FADE - Duration::from_millis(1));
    assert_eq!(sim.view().renders, 0);
    assert!(sim.view().rendered_ids().is_empty());

    sim.advance(Duration::from_millis(1));
    assert_eq!(sim.now(), FADE);
    assert_eq!(sim.view().renders, 1);
    assert_eq!(sim.view().rendered_ids(), ["1", "2"]);
    assert!(sim.view().cards.iter().all(|c| !c.fading));
}

#[test]
fn fading_marks_hidden_cards_too() {
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();
    open_catalog(&mut sim);
    sim.send(UiEvent::FilterClicked("accessories".into()));
    sim.settle();

    let fading: Vec<&str> = sim
        .view()
        .cards
        .iter()
        .filter(|c| c.fading)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(fading, ["ip15", "gs24", "case-ip15", "px8", "case-gs24"]);
}

#[test]
fn burst_of_changes_renders_only_latest() {
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();
    open_catalog(&mut sim);
    let before = sim.stats();

    for text in ["g", "ga", "gal", "gala"] {
        sim.send(UiEvent::SearchInput(text.into()));
        sim.advance(Duration::from_millis(50));
    }
    sim.settle();

    let stats = sim.stats();
    assert_eq!(stats.scheduled - before.scheduled, 4);
    assert_eq!(stats.committed - before.committed, 1);
    assert_eq!(stats.stale - before.stale, 3);
    assert_eq!(sim.view().renders, 2);
    assert_eq!(sim.view().rendered_ids(), ["gs24", "case-gs24"]);
}

#[test]
fn zero_delay_config_renders_on_next_tick() {
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]);
    let config = CatalogConfig::default().with_fade_delay(Duration::ZERO);
    let mut sim = CatalogSimulator::new(config, registry, Arc::new(MemoryStore::new()), view);
    sim.start();
    sim.send(UiEvent::NavClicked("#catalog".into()));
    sim.advance(Duration::ZERO);
    assert_eq!(sim.view().rendered_ids(), ["1", "2"]);
}

// ============================================================================
// Favorites
// ============================================================================

#[test]
fn favorite_toggle_updates_badge_and_all_toggles() {
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();
    let badge = sim.view().badge.clone().expect("badge drawn at start");
    assert_eq!(badge.count, 0);
    assert_eq!(badge.color, "#95A5A6");

    let response = sim.send(UiEvent::FavoriteClicked("px8".into()));
    assert!(response.stop_propagation);
    assert!(!response.prevent_default);
    assert_eq!(response.render, None);

    let badge = sim.view().badge.clone().expect("badge");
    assert_eq!(badge.count, 1);
    assert_eq!(badge.color, "#E74C3C");
    assert_eq!(badge.label, "В избранном: 1 товаров");
    let toggle = sim.view().toggle("px8").expect("toggle");
    assert!(toggle.active);
    assert_eq!(toggle.glyph, "💖");
    assert!(!sim.view().toggle("ip15").expect("toggle").active);
    assert_eq!(sim.view().toggle("ip15").expect("toggle").glyph, "❤️");
    assert_eq!(
        sim.store().get("sotohit-favorites").unwrap().as_deref(),
        Some(r#"["px8"]"#)
    );
}

#[test]
fn favorite_toggle_does_not_rerender() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    let renders = sim.view().renders;
    sim.send(UiEvent::FavoriteClicked("2".into()));
    assert_eq!(sim.pending_timers(), 0);
    assert_eq!(sim.view().renders, renders);
}

#[test]
fn render_commit_reflects_favorites() {
    let store = Arc::new(MemoryStore::with_entries([("sotohit-favorites", r#"["2"]"#)]));
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]);
    let mut sim = CatalogSimulator::new(CatalogConfig::default(), registry, store, view);
    sim.start();

    // Scramble the toggles to prove the commit rewrites them.
    for card in &mut sim.view_mut().cards {
        card.favorite = Some(Default::default());
    }
    open_catalog(&mut sim);
    assert!(sim.view().toggle("2").expect("toggle").active);
    assert_eq!(sim.view().toggle("2").expect("toggle").glyph, "💖");
    assert!(!sim.view().toggle("1").expect("toggle").active);
    assert_eq!(sim.view().toggle("1").expect("toggle").glyph, "❤️");
}

#[test]
fn keyboard_activation_clicks_card_toggle() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    let card = sim.controller().registry().slot_of("2").expect("card 2");

    let response = sim.send(UiEvent::CardKey {
        card,
        key: "Enter".into(),
    });
    assert!(response.prevent_default);
    assert_eq!(response.activate_favorite, Some(card));
    assert_eq!(sim.controller().favorites().ids(), ["2"]);

    sim.send(UiEvent::CardKey {
        card,
        key: " ".into(),
    });
    assert!(sim.controller().favorites().is_empty());

    let response = sim.send(UiEvent::CardKey {
        card: CardSlot(0),
        key: "ArrowDown".into(),
    });
    assert!(!response.prevent_default);
    assert!(sim.controller().favorites().is_empty());
}

#[test]
fn keyboard_activation_without_toggle_is_noop() {
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]).without_toggle("1");
    let mut sim =
        CatalogSimulator::new(CatalogConfig::default(), registry, Arc::new(MemoryStore::new()), view);
    sim.start();
    let response = sim.send(UiEvent::CardKey {
        card: CardSlot(0),
        key: "Enter".into(),
    });
    assert!(response.prevent_default);
    assert!(sim.controller().favorites().is_empty());
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn nav_click_switches_page_and_highlights_links() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    assert_eq!(sim.view().active_page.as_deref(), Some("home"));
    assert_eq!(sim.view().active_links(), ["#home", "#home"]);

    let response = sim.send(UiEvent::NavClicked("#catalog".into()));
    assert!(response.prevent_default);
    assert!(response.render.is_some());
    assert_eq!(sim.view().active_links(), ["#catalog", "#catalog"]);
    assert_eq!(sim.store().get("sotohit-page").unwrap().as_deref(), Some("catalog"));

    sim.send(UiEvent::NavClicked("#home".into()));
    assert_eq!(sim.view().active_page.as_deref(), Some("home"));
    assert!(!sim.controller().is_catalog_active());
}

#[test]
fn nav_click_without_fragment_only_prevents_default() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    let response = sim.send(UiEvent::NavClicked("#".into()));
    assert!(response.prevent_default);
    assert_eq!(sim.controller().state().page, "home");
}

#[test]
fn unknown_page_still_becomes_current() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    sim.send(UiEvent::NavClicked("#contacts".into()));
    assert_eq!(sim.view().active_page, None);
    assert_eq!(sim.controller().state().page, "contacts");
    assert!(sim.view().active_links().is_empty());
    assert_eq!(sim.store().get("sotohit-page").unwrap().as_deref(), Some("contacts"));
}

#[test]
fn leaving_catalog_stops_rerendering() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    sim.send(UiEvent::NavClicked("#home".into()));
    let response = sim.send(UiEvent::SortClicked("price-asc".into()));
    assert_eq!(response.render, None);
    assert_eq!(sim.controller().state().sort, SortMode::PriceAsc);
}

#[test]
fn container_added_later_is_bound_on_next_visit() {
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]).without_container();
    let mut sim =
        CatalogSimulator::new(CatalogConfig::default(), registry, Arc::new(MemoryStore::new()), view);
    sim.start();

    let response = sim.send(UiEvent::NavClicked("#catalog".into()));
    assert_eq!(response.render, None);
    assert!(!sim.controller().container_bound());
    assert_eq!(sim.send(UiEvent::FilterClicked("b".into())).render, None);

    sim.view_mut().container_in_markup = true;
    sim.send(UiEvent::NavClicked("#home".into()));
    open_catalog(&mut sim);
    assert_eq!(sim.view().rendered_ids(), ["2"]);
}

#[test]
fn container_removed_from_markup_is_unbound() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    assert_eq!(sim.view().rendered_ids(), ["1", "2"]);

    sim.view_mut().container_in_markup = false;
    sim.send(UiEvent::NavClicked("#home".into()));
    let response = sim.send(UiEvent::NavClicked("#catalog".into()));
    assert_eq!(response.render, None);
    assert!(!sim.controller().container_bound());
    assert_eq!(sim.view().container, None);
    assert_eq!(sim.send(UiEvent::SortClicked("price-asc".into())).render, None);
    assert_eq!(sim.pending_timers(), 0);
}

#[test]
fn empty_page_id_keeps_current_page() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);

    assert_eq!(sim.controller_mut().show_page(""), None);
    assert_eq!(sim.controller().state().page, "catalog");
    assert_eq!(sim.view().active_page.as_deref(), Some("catalog"));

    sim.reload();
    assert_eq!(sim.controller().state().page, "catalog");
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn reload_reproduces_visible_state() {
    init_test_logging();
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();
    open_catalog(&mut sim);
    sim.send(UiEvent::SortClicked("price-asc".into()));
    sim.send(UiEvent::FilterClicked("phones".into()));
    sim.send(UiEvent::SearchInput(" Pixel ".into()));
    sim.send(UiEvent::FavoriteClicked("gs24".into()));
    sim.send(UiEvent::FavoriteClicked("px8".into()));
    sim.settle();
    let rendered = sim.view().rendered_ids();
    let state = sim.controller().state().clone();
    let favorites = sim.controller().favorites().clone();

    sim.reload();
    assert_eq!(sim.controller().state(), &state);
    assert_eq!(sim.controller().favorites(), &favorites);

    sim.start();
    sim.settle();
    assert_eq!(sim.view().rendered_ids(), rendered);
    assert_eq!(sim.view().rendered_ids(), ["px8"]);
    assert_eq!(sim.view().search_box.as_deref(), Some(" Pixel "));
    assert_eq!(sim.view().active_sort(), ["price-asc"]);
    assert_eq!(sim.view().active_filter(), ["phones"]);
    assert_eq!(sim.view().badge.as_ref().map(|b| b.count), Some(2));
}

#[test]
fn empty_category_value_survives_reload() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    open_catalog(&mut sim);
    sim.send(UiEvent::FilterClicked("a".into()));
    sim.send(UiEvent::FilterClicked(String::new()));
    sim.settle();
    assert_eq!(sim.controller().state().filter, CategoryFilter::All);
    assert_eq!(sim.store().get("sotohit-filter").unwrap().as_deref(), Some("all"));
    let rendered = sim.view().rendered_ids();
    assert_eq!(rendered, ["1", "2"]);

    sim.reload();
    sim.start();
    sim.settle();
    assert_eq!(sim.controller().state().filter, CategoryFilter::All);
    assert_eq!(sim.view().rendered_ids(), rendered);
}

#[test]
fn removal_position_is_forgotten_on_reload() {
    let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
    sim.start();
    for id in ["1", "2", "1"] {
        sim.send(UiEvent::FavoriteClicked(id.into()));
    }
    assert_eq!(sim.controller().favorites().ids(), ["2"]);

    sim.reload();
    sim.start();
    sim.send(UiEvent::FavoriteClicked("1".into()));
    assert_eq!(sim.controller().favorites().ids(), ["2", "1"]);
    assert_eq!(sim.store().get("sotohit-favorites").unwrap().as_deref(), Some(r#"["2","1"]"#));
}

#[test]
fn controls_highlight_follows_choice() {
    let mut sim = CatalogSimulator::storefront(fixtures::phone_shop());
    sim.start();
    assert_eq!(sim.view().active_sort(), ["default"]);
    assert_eq!(sim.view().active_filter(), ["all"]);
    sim.send(UiEvent::SortClicked("price-desc".into()));
    sim.send(UiEvent::FilterClicked("cases".into()));
    assert_eq!(sim.view().active_sort(), ["price-desc"]);
    assert_eq!(sim.view().active_filter(), ["cases"]);
    assert_eq!(
        sim.controller().state().filter,
        CategoryFilter::Category("cases".into())
    );
}

#[test]
fn malformed_stored_favorites_start_empty() {
    let store = Arc::new(MemoryStore::with_entries([
        ("sotohit-favorites", "{broken"),
        ("sotohit-sort", "by-name"),
    ]));
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]);
    let mut sim = CatalogSimulator::new(CatalogConfig::default(), registry, store, view);
    sim.start();
    assert!(sim.controller().favorites().is_empty());
    assert_eq!(sim.controller().state().sort, SortMode::Default);

    sim.send(UiEvent::FavoriteClicked("1".into()));
    assert_eq!(
        sim.store().get("sotohit-favorites").unwrap().as_deref(),
        Some(r#"["1"]"#)
    );
}

#[test]
fn missing_optional_elements_are_tolerated() {
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"])
        .without_search()
        .without_badge();
    let store = Arc::new(MemoryStore::with_entries([("sotohit-search", "first")]));
    let mut sim = CatalogSimulator::new(CatalogConfig::default(), registry, store, view);
    sim.start();
    sim.send(UiEvent::FavoriteClicked("1".into()));
    open_catalog(&mut sim);
    assert_eq!(sim.view().badge, None);
    assert_eq!(sim.view().search_box, None);
    assert_eq!(sim.view().rendered_ids(), ["1"]);
}

#[test]
fn custom_prefix_isolates_storage() {
    let registry = fixtures::scenario_cards();
    let view = RecordingView::storefront(&registry, &["a", "b"]);
    let config =
        CatalogConfig::default().with_keys(vitrine_core::StorageKeys::with_prefix("demo"));
    let store = Arc::new(MemoryStore::new());
    let mut sim = CatalogSimulator::new(config, registry, Arc::clone(&store), view);
    sim.start();
    sim.send(UiEvent::SortClicked("price-desc".into()));
    assert_eq!(store.get("demo-sort").unwrap().as_deref(), Some("price-desc"));
    assert_eq!(store.get("sotohit-sort").unwrap(), None);
}
