#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use vitrine_core::{CatalogController, MemoryStore, PreferenceStore};
use wasm_bindgen::prelude::*;

use crate::config::WebConfig;
use crate::dom::{DomView, scan_cards};
use crate::events::{Bindings, Host};
use crate::local_storage::LocalStore;
use crate::logging;

/// Catalog browser mounted on the current document.
///
/// Call [`start`](Self::start) once the DOM is ready (`DOMContentLoaded`).
#[wasm_bindgen]
pub struct VitrineWeb {
    host: Option<Rc<Host>>,
    bindings: Option<Bindings>,
}

#[wasm_bindgen]
impl VitrineWeb {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            host: None,
            bindings: None,
        }
    }

    /// Scan the page, restore saved preferences, wire listeners, and show
    /// the saved page.
    ///
    /// `options` is an optional JSON string (see `WebConfig`). Calling
    /// `start` again tears down the previous session first.
    pub fn start(&mut self, options: Option<String>) -> Result<(), JsValue> {
        let config = WebConfig::from_options(options.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let filter = config
            .log_filter()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        logging::init(filter);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        self.destroy();

        let store: Box<dyn PreferenceStore> = match LocalStore::from_window(&window) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!(error = %err, "preferences will not survive a reload");
                Box::new(MemoryStore::new())
            }
        };
        let (registry, card_elements) = scan_cards(&document, &config.selectors);
        let view = DomView::new(document, config.selectors.clone(), card_elements);
        let controller = CatalogController::new(config.catalog_config(), registry, store, view);

        let host = Rc::new(Host {
            window,
            controller: RefCell::new(controller),
        });
        let bindings = Bindings::attach(&host);

        let ticket = host.controller.borrow_mut().start();
        if let Some(ticket) = ticket {
            host.schedule_render(ticket);
        }
        info!("catalog started");

        self.host = Some(host);
        self.bindings = Some(bindings);
        Ok(())
    }

    /// Switch pages from script, as a navigation link would.
    #[wasm_bindgen(js_name = showPage)]
    pub fn show_page(&self, page: &str) {
        let Some(host) = &self.host else {
            return;
        };
        let ticket = match host.controller.try_borrow_mut() {
            Ok(mut controller) => controller.show_page(page),
            Err(_) => return,
        };
        if let Some(ticket) = ticket {
            host.schedule_render(ticket);
        }
    }

    /// Current number of favorites (0 before `start`).
    #[wasm_bindgen(js_name = favoriteCount)]
    pub fn favorite_count(&self) -> u32 {
        self.host
            .as_ref()
            .and_then(|host| host.controller.try_borrow().ok().map(|c| c.favorites().count()))
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
    }

    /// Detach every listener and drop the controller. Pending renders become
    /// no-ops.
    pub fn destroy(&mut self) {
        self.bindings = None;
        self.host = None;
    }
}

impl Default for VitrineWeb {
    fn default() -> Self {
        Self::new()
    }
}
