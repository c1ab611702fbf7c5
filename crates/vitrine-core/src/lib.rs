#![forbid(unsafe_code)]

//! Vitrine core: the view/state synchronizer behind a pre-rendered product
//! catalog.
//!
//! The page ships every product card in its markup. This crate decides which
//! of those cards are visible and in what order, which page is showing, and
//! which products are favorites, and keeps all of that persisted between
//! visits. It never touches markup itself: hosts implement [`CatalogView`]
//! (presentation) and [`PreferenceStore`] (persistence).
//!
//! # Key Components
//!
//! - [`CardRegistry`] - immutable snapshot of the cards found at startup
//! - [`FavoriteSet`] - insertion-ordered favorite ids
//! - [`visible_cards`] - the filter → sort pipeline
//! - [`RenderScheduler`] - generation-checked deferred renders
//! - [`CatalogController`] - owns the state and drives the view
//! - [`dispatch`] - maps [`UiEvent`]s onto controller operations
//!
//! # Flow
//!
//! ```text
//! DOM event ─► UiEvent ─► dispatch ─► CatalogController ─► Preferences (write-through)
//!                                            │
//!                                            └─► CatalogView ─► markup
//! ```

pub mod binding;
pub mod card;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod pipeline;
pub mod scheduler;
pub mod state;
pub mod store;
pub mod view;

pub use binding::{EventResponse, UiEvent, dispatch};
pub use card::{CardRegistry, CardSlot, Price, ProductCard};
pub use config::{BadgeStyle, CatalogConfig, FavoriteGlyphs, StorageKeys};
pub use controller::CatalogController;
pub use error::{ConfigError, StorageError, StorageResult};
pub use favorites::{BadgeState, FavoriteSet, Toggled};
pub use pipeline::visible_cards;
pub use scheduler::{RenderPlan, RenderScheduler, RenderTicket};
pub use state::{CategoryFilter, SortMode, ViewState};
pub use store::{MemoryStore, PreferenceStore, Preferences};
pub use view::CatalogView;
