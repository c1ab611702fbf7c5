//! DOM listeners feeding [`UiEvent`]s into the controller.
//!
//! Listeners are owned by [`Bindings`] and detached when it drops. Each
//! handler borrows the controller only while dispatching; follow-up work
//! that can re-enter (programmatic clicks, timers) runs after the borrow ends.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use vitrine_core::{
    CardSlot, CatalogController, EventResponse, PreferenceStore, RenderTicket, UiEvent, dispatch,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, EventTarget, KeyboardEvent, Window};

use crate::dom::{DomView, query_all};

pub(crate) type Controller = CatalogController<Box<dyn PreferenceStore>, DomView>;

/// Browser-side context shared by every handler.
pub(crate) struct Host {
    pub(crate) window: Window,
    pub(crate) controller: RefCell<Controller>,
}

impl Host {
    /// Dispatch `ui` and carry out the response on `event`.
    fn handle(self: &Rc<Self>, event: &Event, ui: UiEvent) {
        let response = {
            let Ok(mut controller) = self.controller.try_borrow_mut() else {
                warn!(?ui, "controller busy, event dropped");
                return;
            };
            dispatch(&mut *controller, ui)
        };
        self.follow_up(Some(event), response);
    }

    pub(crate) fn follow_up(self: &Rc<Self>, event: Option<&Event>, response: EventResponse) {
        if let Some(event) = event {
            if response.prevent_default {
                event.prevent_default();
            }
            if response.stop_propagation {
                event.stop_propagation();
            }
        }
        if let Some(ticket) = response.render {
            self.schedule_render(ticket);
        }
        if let Some(slot) = response.activate_favorite {
            self.click_favorite(slot);
        }
    }

    /// Commit `ticket` after its delay. Stale tickets are dropped by the controller.
    pub(crate) fn schedule_render(self: &Rc<Self>, ticket: RenderTicket) {
        let host: Weak<Self> = Rc::downgrade(self);
        let callback = Closure::once_into_js(move || {
            let Some(host) = host.upgrade() else {
                return;
            };
            match host.controller.try_borrow_mut() {
                Ok(mut controller) => {
                    controller.commit_render(ticket);
                }
                Err(_) => warn!(generation = ticket.generation, "controller busy, render skipped"),
            }
        });
        let delay_ms = i32::try_from(ticket.delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                delay_ms,
            )
        {
            warn!(error = ?err, "setTimeout failed, render skipped");
        }
    }

    fn click_favorite(&self, slot: CardSlot) {
        let control = match self.controller.try_borrow() {
            Ok(controller) => controller.view().favorite_control(slot),
            Err(_) => None,
        };
        if let Some(control) = control {
            control.click();
        }
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Every listener attached by [`Bindings::attach`].
#[derive(Default)]
pub(crate) struct Bindings {
    listeners: Vec<Listener>,
}

impl Bindings {
    /// Wire every interactive element in the storefront to `host`.
    pub(crate) fn attach(host: &Rc<Host>) -> Self {
        let mut bindings = Self::default();
        let Ok(controller) = host.controller.try_borrow() else {
            return bindings;
        };
        let view = controller.view();
        let selectors = view.selectors();

        for button in view.sort_buttons() {
            let source = button.clone();
            bindings.listen(host, button, "click", move |_| {
                source.get_attribute("data-sort").map(UiEvent::SortClicked)
            });
        }

        for button in view.filter_buttons() {
            let source = button.clone();
            bindings.listen(host, button, "click", move |_| {
                source
                    .get_attribute("data-category")
                    .map(UiEvent::FilterClicked)
            });
        }

        if let Some(input) = view.search_input() {
            let source = input.clone();
            bindings.listen(host, input, "input", move |_| {
                Some(UiEvent::SearchInput(source.value()))
            });
        }

        for toggle in query_all(view.document(), &selectors.favorite_toggle) {
            let source = toggle.clone();
            bindings.listen(host, &toggle, "click", move |event| {
                match source.get_attribute("data-id") {
                    Some(id) => Some(UiEvent::FavoriteClicked(id)),
                    None => {
                        // Still keep the click away from the card.
                        event.stop_propagation();
                        None
                    }
                }
            });
        }

        for link in view.nav_links() {
            let source = link.clone();
            bindings.listen(host, link, "click", move |_| {
                source.get_attribute("href").map(UiEvent::NavClicked)
            });
        }

        if let Some(button) = view.document().get_element_by_id(&selectors.go_to_catalog_id) {
            bindings.listen(host, &button, "click", |_| Some(UiEvent::GoToCatalog));
        }

        for (idx, card) in view.cards().iter().enumerate() {
            bindings.listen(host, card, "keydown", move |event| {
                event.dyn_ref::<KeyboardEvent>().map(|key| UiEvent::CardKey {
                    card: CardSlot(idx),
                    key: key.key(),
                })
            });
        }

        debug!(listeners = bindings.listeners.len(), "listeners attached");
        bindings
    }

    fn listen<F>(&mut self, host: &Rc<Host>, target: &Element, kind: &'static str, mut to_ui: F)
    where
        F: FnMut(&Event) -> Option<UiEvent> + 'static,
    {
        let host = Rc::clone(host);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(ui) = to_ui(&event) {
                host.handle(&event, ui);
            }
        });
        let target: EventTarget = target.clone().into();
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => self.listeners.push(Listener {
                target,
                kind,
                closure,
            }),
            Err(err) => warn!(kind, error = ?err, "addEventListener failed"),
        }
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
