#![forbid(unsafe_code)]

//! WASM frontend for Vitrine.
//!
//! Binds [`vitrine_core::CatalogController`] to a pre-rendered storefront:
//! - cards, pages, links and controls are discovered with CSS selectors,
//! - preferences live in `window.localStorage`,
//! - deferred renders run on `setTimeout`,
//! - `tracing` output goes to the browser console.
//!
//! JS usage:
//!
//! ```js
//! import init, { VitrineWeb } from "./pkg/vitrine_web.js";
//! await init();
//! const vitrine = new VitrineWeb();
//! vitrine.start(JSON.stringify({ log_level: "debug" }));
//! ```

pub mod config;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::{DomSelectors, WebConfig};

#[cfg(target_arch = "wasm32")]
pub use wasm::VitrineWeb;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct VitrineWeb;

#[cfg(not(target_arch = "wasm32"))]
impl VitrineWeb {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
