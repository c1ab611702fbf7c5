//! The catalog controller.
//!
//! [`CatalogController`] owns every piece of mutable state for one page: the
//! card registry, the view state, the favorites, the pending render, and the
//! persisted preferences. All mutation goes through it, and every mutation is
//! written through to the store before the method returns.
//!
//! Rendering is two-phase. [`apply`](CatalogController::apply) runs the
//! pipeline, marks the cards as fading, and returns a [`RenderTicket`]. The
//! host waits `ticket.delay` and hands the ticket back to
//! [`commit_render`](CatalogController::commit_render); only the newest
//! ticket swaps the container contents.

use tracing::{debug, info, trace};

use crate::card::CardRegistry;
use crate::config::CatalogConfig;
use crate::favorites::{BadgeState, FavoriteSet, Toggled};
use crate::pipeline::visible_cards;
use crate::scheduler::{RenderPlan, RenderScheduler, RenderTicket};
use crate::state::{CategoryFilter, SortMode, ViewState};
use crate::store::{PreferenceStore, Preferences};
use crate::view::CatalogView;

/// View/state synchronizer for one catalog page.
pub struct CatalogController<S, V> {
    config: CatalogConfig,
    registry: CardRegistry,
    prefs: Preferences<S>,
    view: V,
    state: ViewState,
    favorites: FavoriteSet,
    scheduler: RenderScheduler,
    container_bound: bool,
}

impl<S: PreferenceStore, V: CatalogView> CatalogController<S, V> {
    /// Create a controller, loading preferences from `store`.
    ///
    /// Nothing is drawn until [`start`](Self::start).
    pub fn new(config: CatalogConfig, registry: CardRegistry, store: S, view: V) -> Self {
        let prefs = Preferences::new(store, config.keys.clone());
        let state = prefs.load_view_state(&config.home_page);
        let favorites = prefs.load_favorites();
        info!(
            store = prefs.store().name(),
            cards = registry.len(),
            page = %state.page,
            sort = %state.sort,
            filter = %state.filter,
            favorites = favorites.count(),
            "catalog state loaded"
        );
        Self {
            config,
            registry,
            prefs,
            view,
            state,
            favorites,
            scheduler: RenderScheduler::new(),
            container_bound: false,
        }
    }

    /// Bring the page in line with the loaded state and show the saved page.
    ///
    /// The saved search text is restored before the page is shown so the
    /// first catalog render already honors it.
    pub fn start(&mut self) -> Option<RenderTicket> {
        self.refresh_badge();
        self.refresh_controls();
        self.view
            .sync_favorite_controls(&self.favorites, &self.config.glyphs);
        if !self.state.search.is_empty() {
            self.view.set_search_text(&self.state.search);
        }
        let page = self.state.page.clone();
        self.show_page(&page)
    }

    /// Switch to `page` and persist it.
    ///
    /// Unknown ids still become the current page; an empty id is ignored.
    /// Showing the catalog (re)binds the render container and runs the
    /// pipeline.
    pub fn show_page(&mut self, page: &str) -> Option<RenderTicket> {
        if page.is_empty() {
            debug!("empty page id ignored");
            return None;
        }
        let found = self.view.show_page(page);
        self.state.page = page.to_string();
        self.view.highlight_nav(page);
        debug!(page, found, "page shown");

        let ticket = if page == self.config.catalog_page {
            self.container_bound = self.view.bind_container();
            if !self.container_bound {
                debug!("render container missing");
            }
            self.apply()
        } else {
            None
        };

        self.prefs.persist_page(page);
        ticket
    }

    /// Recompute the visible cards and schedule their render.
    ///
    /// No-op until the render container has been bound.
    pub fn apply(&mut self) -> Option<RenderTicket> {
        if !self.container_bound {
            return None;
        }
        let order = visible_cards(&self.registry, &self.state);
        debug!(
            visible = order.len(),
            total = self.registry.len(),
            sort = %self.state.sort,
            filter = %self.state.filter,
            "pipeline applied"
        );
        self.view.mark_fading();
        Some(
            self.scheduler
                .schedule(RenderPlan { order }, self.config.fade_delay),
        )
    }

    /// Swap the container contents for `ticket`'s plan.
    ///
    /// Returns `false` for stale tickets, which leave the page untouched.
    pub fn commit_render(&mut self, ticket: RenderTicket) -> bool {
        let Some(plan) = self.scheduler.take(ticket) else {
            trace!(generation = ticket.generation, "stale render dropped");
            return false;
        };
        if !self.container_bound {
            return false;
        }
        self.view.replace_container(&plan.order);
        for &slot in &plan.order {
            let Some(card) = self.registry.get(slot) else {
                continue;
            };
            let active = self.favorites.contains(&card.id);
            let glyph = if active {
                &self.config.glyphs.active
            } else {
                &self.config.glyphs.inactive
            };
            self.view.set_card_favorite(slot, active, glyph);
        }
        trace!(generation = ticket.generation, rendered = plan.order.len(), "render committed");
        true
    }

    /// Choose a sort mode, persist it, and re-run the pipeline on the catalog.
    pub fn set_sort(&mut self, sort: SortMode) -> Option<RenderTicket> {
        self.state.sort = sort;
        self.prefs.persist_sort(sort);
        self.refresh_controls();
        self.refresh_catalog()
    }

    /// Choose a category filter, persist it, and re-run the pipeline on the catalog.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> Option<RenderTicket> {
        let filter = match filter {
            CategoryFilter::Category(c) if c.is_empty() => CategoryFilter::All,
            other => other,
        };
        self.prefs.persist_filter(&filter);
        self.state.filter = filter;
        self.refresh_controls();
        self.refresh_catalog()
    }

    /// Record new search text, persist it, and re-run the pipeline on the catalog.
    pub fn set_search(&mut self, text: &str) -> Option<RenderTicket> {
        self.state.search = text.to_string();
        self.prefs.persist_search(text);
        self.refresh_catalog()
    }

    /// Flip `id`'s favorite membership.
    ///
    /// Persists the set, refreshes the badge and every favorite toggle. The
    /// pipeline is not re-run.
    pub fn toggle_favorite(&mut self, id: &str) -> Toggled {
        let toggled = self.favorites.toggle(id);
        self.prefs.persist_favorites(&self.favorites);
        info!(id, ?toggled, count = self.favorites.count(), "favorite toggled");
        self.refresh_badge();
        self.view
            .sync_favorite_controls(&self.favorites, &self.config.glyphs);
        toggled
    }

    /// Badge presentation for the current favorite count.
    #[must_use]
    pub fn badge(&self) -> BadgeState {
        BadgeState::from_count(self.favorites.count(), &self.config.badge)
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    #[must_use]
    pub fn preferences(&self) -> &Preferences<S> {
        &self.prefs
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Whether the catalog is the current page.
    #[must_use]
    pub fn is_catalog_active(&self) -> bool {
        self.state.page == self.config.catalog_page
    }

    /// Whether the render container has been bound.
    #[must_use]
    pub const fn container_bound(&self) -> bool {
        self.container_bound
    }

    /// Whether a render is waiting for its ticket.
    #[must_use]
    pub fn render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn refresh_catalog(&mut self) -> Option<RenderTicket> {
        if self.is_catalog_active() {
            self.apply()
        } else {
            None
        }
    }

    fn refresh_badge(&mut self) {
        let badge = self.badge();
        self.view.update_badge(&badge);
    }

    fn refresh_controls(&mut self) {
        self.view.highlight_controls(self.state.sort, &self.state.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardSlot, ProductCard};
    use crate::config::FavoriteGlyphs;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    /// Records calls by name only.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<String>,
        has_container: bool,
    }

    impl CatalogView for CallLog {
        fn show_page(&mut self, page: &str) -> bool {
            self.calls.push(format!("show:{page}"));
            true
        }
        fn highlight_nav(&mut self, page: &str) {
            self.calls.push(format!("nav:{page}"));
        }
        fn bind_container(&mut self) -> bool {
            self.calls.push("bind".into());
            self.has_container
        }
        fn mark_fading(&mut self) {
            self.calls.push("fade".into());
        }
        fn replace_container(&mut self, order: &[CardSlot]) {
            self.calls.push(format!("replace:{}", order.len()));
        }
        fn set_card_favorite(&mut self, slot: CardSlot, active: bool, _glyph: &str) {
            self.calls.push(format!("card-fav:{}:{active}", slot.0));
        }
        fn sync_favorite_controls(&mut self, favorites: &FavoriteSet, _glyphs: &FavoriteGlyphs) {
            self.calls.push(format!("sync-favs:{}", favorites.count()));
        }
        fn update_badge(&mut self, badge: &BadgeState) {
            self.calls.push(format!("badge:{}", badge.count));
        }
        fn highlight_controls(&mut self, sort: SortMode, filter: &CategoryFilter) {
            self.calls.push(format!("controls:{sort}:{filter}"));
        }
        fn set_search_text(&mut self, text: &str) {
            self.calls.push(format!("search:{text}"));
        }
    }

    fn controller(store: MemoryStore, has_container: bool) -> CatalogController<MemoryStore, CallLog> {
        let registry = CardRegistry::new(vec![
            ProductCard::from_markup("1", "Alpha", "a", "10"),
            ProductCard::from_markup("2", "Beta", "b", "5"),
        ]);
        let view = CallLog {
            has_container,
            ..CallLog::default()
        };
        CatalogController::new(CatalogConfig::default(), registry, store, view)
    }

    #[test]
    fn start_on_home_draws_chrome_without_render() {
        let mut ctl = controller(MemoryStore::new(), true);
        assert_eq!(ctl.start(), None);
        assert_eq!(
            ctl.view().calls,
            ["badge:0", "controls:default:all", "sync-favs:0", "show:home", "nav:home"]
        );
        assert!(!ctl.container_bound());
    }

    #[test]
    fn start_restores_search_before_showing_catalog() {
        let store = MemoryStore::with_entries([("sotohit-page", "catalog"), ("sotohit-search", "alp")]);
        let mut ctl = controller(store, true);
        let ticket = ctl.start().expect("catalog start schedules a render");
        assert_eq!(
            ctl.view().calls,
            [
                "badge:0",
                "controls:default:all",
                "sync-favs:0",
                "search:alp",
                "show:catalog",
                "nav:catalog",
                "bind",
                "fade",
            ]
        );
        assert!(ctl.commit_render(ticket));
        assert_eq!(&ctl.view().calls[8..], ["replace:1", "card-fav:0:false"]);
    }

    #[test]
    fn apply_without_container_is_noop() {
        let mut ctl = controller(MemoryStore::new(), false);
        assert_eq!(ctl.show_page("catalog"), None);
        assert_eq!(ctl.apply(), None);
        assert!(!ctl.render_pending());
        assert_eq!(ctl.preferences().load_view_state("home").page, "catalog");
    }

    #[test]
    fn state_changes_off_catalog_only_persist() {
        let mut ctl = controller(MemoryStore::new(), true);
        ctl.start();
        assert_eq!(ctl.set_sort(SortMode::PriceAsc), None);
        assert_eq!(ctl.set_filter(CategoryFilter::parse("b")), None);
        assert_eq!(ctl.set_search("be"), None);
        let saved = ctl.preferences().load_view_state("home");
        assert_eq!(saved.sort, SortMode::PriceAsc);
        assert_eq!(saved.filter, CategoryFilter::parse("b"));
        assert_eq!(saved.search, "be");
    }

    #[test]
    fn empty_page_id_is_ignored() {
        let mut ctl = controller(MemoryStore::new(), true);
        ctl.start();
        ctl.view_mut().calls.clear();
        assert_eq!(ctl.show_page(""), None);
        assert!(ctl.view().calls.is_empty());
        assert_eq!(ctl.state().page, "home");
        assert_eq!(ctl.preferences().store().get("sotohit-page").unwrap(), Some("home".into()));
    }

    #[test]
    fn empty_category_is_stored_as_all() {
        let mut ctl = controller(MemoryStore::new(), true);
        ctl.set_filter(CategoryFilter::Category(String::new()));
        assert_eq!(ctl.state().filter, CategoryFilter::All);
        assert_eq!(ctl.preferences().store().get("sotohit-filter").unwrap(), Some("all".into()));
    }

    #[test]
    fn toggle_refreshes_badge_and_controls_only() {
        let mut ctl = controller(MemoryStore::new(), true);
        ctl.view_mut().calls.clear();
        assert_eq!(ctl.toggle_favorite("2"), Toggled::Added);
        assert_eq!(ctl.view().calls, ["badge:1", "sync-favs:1"]);
        assert_eq!(ctl.badge().color, "#E74C3C");
    }
}
