//! Host simulator with a deterministic clock.
//!
//! [`CatalogSimulator`] plays the role of the browser: it dispatches
//! [`UiEvent`]s, honors the returned [`EventResponse`], and keeps the timers
//! the controller asks for. Time only moves when the test calls
//! [`advance`](CatalogSimulator::advance), so deferred renders fire exactly
//! when expected.
//!
//! ```ignore
//! let mut sim = CatalogSimulator::storefront(fixtures::scenario_cards());
//! sim.start();
//! sim.send(UiEvent::NavClicked("#catalog".into()));
//! sim.settle();
//! assert_eq!(sim.view().rendered_ids(), ["1", "2"]);
//! ```

use core::time::Duration;
use std::sync::Arc;

use vitrine_core::{
    CardRegistry, CatalogConfig, CatalogController, EventResponse, MemoryStore, RenderTicket,
    UiEvent, dispatch,
};

use crate::view::RecordingView;

/// A timer the host has been asked to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    due: Duration,
    seq: u64,
    ticket: RenderTicket,
}

/// Counts of what happened to scheduled renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerStats {
    pub scheduled: usize,
    pub committed: usize,
    pub stale: usize,
}

/// Deterministic browser stand-in.
pub struct CatalogSimulator {
    controller: CatalogController<Arc<MemoryStore>, RecordingView>,
    store: Arc<MemoryStore>,
    template: RecordingView,
    config: CatalogConfig,
    registry: CardRegistry,
    now: Duration,
    seq: u64,
    timers: Vec<Timer>,
    stats: TimerStats,
}

impl CatalogSimulator {
    /// Simulate `view` backed by `store`.
    #[must_use]
    pub fn new(
        config: CatalogConfig,
        registry: CardRegistry,
        store: Arc<MemoryStore>,
        view: RecordingView,
    ) -> Self {
        let controller =
            CatalogController::new(config.clone(), registry.clone(), Arc::clone(&store), view.clone());
        Self {
            controller,
            store,
            template: view,
            config,
            registry,
            now: Duration::ZERO,
            seq: 0,
            timers: Vec::new(),
            stats: TimerStats::default(),
        }
    }

    /// Default storefront over `registry` with an empty store.
    #[must_use]
    pub fn storefront(registry: CardRegistry) -> Self {
        let categories = crate::fixtures::categories(&registry);
        let category_refs: Vec<&str> = categories.iter().map(String::as_str).collect();
        let view = RecordingView::storefront(&registry, &category_refs);
        Self::new(
            CatalogConfig::default(),
            registry,
            Arc::new(MemoryStore::new()),
            view,
        )
    }

    /// Run the controller's startup sequence.
    pub fn start(&mut self) {
        let ticket = self.controller.start();
        self.schedule(ticket);
    }

    /// Deliver one interaction, the way the browser would.
    pub fn send(&mut self, event: UiEvent) -> EventResponse {
        let response = dispatch(&mut self.controller, event);
        self.schedule(response.render);
        if let Some(slot) = response.activate_favorite {
            let clicked = self
                .controller
                .view()
                .cards
                .get(slot.0)
                .filter(|card| card.favorite.is_some())
                .map(|card| card.id.clone());
            if let Some(id) = clicked {
                self.send(UiEvent::FavoriteClicked(id));
            }
        }
        response
    }

    /// Move the clock forward, firing due timers in scheduling order.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
        self.timers.sort_by_key(|t| (t.due, t.seq));
        let due: Vec<Timer> = self
            .timers
            .iter()
            .copied()
            .take_while(|t| t.due <= self.now)
            .collect();
        self.timers.drain(..due.len());
        for timer in due {
            if self.controller.commit_render(timer.ticket) {
                self.stats.committed += 1;
            } else {
                self.stats.stale += 1;
            }
        }
    }

    /// Advance until no timer is left.
    pub fn settle(&mut self) {
        while let Some(latest) = self.timers.iter().map(|t| t.due).max() {
            let dt = latest.saturating_sub(self.now);
            self.advance(dt);
        }
    }

    /// Throw away everything but the store and start over, like a page reload.
    pub fn reload(&mut self) {
        self.controller = CatalogController::new(
            self.config.clone(),
            self.registry.clone(),
            Arc::clone(&self.store),
            self.template.clone(),
        );
        self.timers.clear();
        self.now = Duration::ZERO;
    }

    #[must_use]
    pub fn controller(&self) -> &CatalogController<Arc<MemoryStore>, RecordingView> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CatalogController<Arc<MemoryStore>, RecordingView> {
        &mut self.controller
    }

    #[must_use]
    pub fn view(&self) -> &RecordingView {
        self.controller.view()
    }

    pub fn view_mut(&mut self) -> &mut RecordingView {
        self.controller.view_mut()
    }

    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub const fn stats(&self) -> TimerStats {
        self.stats
    }

    fn schedule(&mut self, ticket: Option<RenderTicket>) {
        let Some(ticket) = ticket else {
            return;
        };
        self.seq += 1;
        self.stats.scheduled += 1;
        self.timers.push(Timer {
            due: self.now.saturating_add(ticket.delay),
            seq: self.seq,
            ticket,
        });
    }
}
