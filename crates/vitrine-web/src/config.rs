//! Options accepted by [`VitrineWeb::start`](crate::VitrineWeb).
//!
//! The host passes a JSON object; every field is optional and falls back to
//! the storefront's stock markup:
//!
//! ```json
//! {
//!   "key_prefix": "sotohit",
//!   "fade_delay_ms": 200,
//!   "log_level": "info",
//!   "selectors": { "card": ".product-card", "container_id": "products-grid" }
//! }
//! ```

use core::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use vitrine_core::config::DEFAULT_KEY_PREFIX;
use vitrine_core::{CatalogConfig, ConfigError, StorageKeys};

/// Where the controller finds things in the markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomSelectors {
    /// Product cards (`data-id`, `data-category`, `data-price`).
    pub card: String,
    /// Title element inside a card.
    pub title: String,
    /// Favorite toggle, inside cards and anywhere else (`data-id`).
    pub favorite_toggle: String,
    /// Sort controls (`data-sort`).
    pub sort_button: String,
    /// Filter controls (`data-category`).
    pub filter_button: String,
    /// Navigation links with `#page` hrefs.
    pub nav_link: String,
    /// Page sections.
    pub page: String,
    pub search_input_id: String,
    pub badge_id: String,
    pub counter_id: String,
    /// Render container inside the catalog page.
    pub container_id: String,
    pub go_to_catalog_id: String,
    pub active_class: String,
    pub fading_class: String,
}

impl Default for DomSelectors {
    fn default() -> Self {
        Self {
            card: ".product-card".to_string(),
            title: ".product-title".to_string(),
            favorite_toggle: ".btn-fav".to_string(),
            sort_button: ".sort-btn".to_string(),
            filter_button: ".filter-btn".to_string(),
            nav_link: "nav a, footer .footer-nav a".to_string(),
            page: ".page".to_string(),
            search_input_id: "search-input".to_string(),
            badge_id: "favorites-badge".to_string(),
            counter_id: "favorites-count".to_string(),
            container_id: "products-grid".to_string(),
            go_to_catalog_id: "go-to-catalog-btn".to_string(),
            active_class: "active".to_string(),
            fading_class: "fade-out".to_string(),
        }
    }
}

/// Host options for the web frontend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebConfig {
    pub key_prefix: String,
    pub fade_delay_ms: u64,
    /// `EnvFilter` directive, e.g. `info` or `vitrine_core=debug`.
    pub log_level: String,
    pub home_page: String,
    pub catalog_page: String,
    pub selectors: DomSelectors,
}

impl Default for WebConfig {
    fn default() -> Self {
        let catalog = CatalogConfig::default();
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            fade_delay_ms: u64::try_from(catalog.fade_delay.as_millis()).unwrap_or(u64::MAX),
            log_level: "info".to_string(),
            home_page: catalog.home_page,
            catalog_page: catalog.catalog_page,
            selectors: DomSelectors::default(),
        }
    }
}

impl WebConfig {
    /// Parse and validate host options. `None` or blank text means defaults.
    pub fn from_options(options: Option<&str>) -> Result<Self, ConfigError> {
        let config = match options.map(str::trim) {
            None | Some("") => Self::default(),
            Some(raw) => {
                serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Log filter for the console subscriber.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| ConfigError::Invalid(format!("log level `{}`: {e}", self.log_level)))
    }

    /// Controller configuration derived from these options.
    #[must_use]
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::default()
            .with_keys(StorageKeys::with_prefix(&self.key_prefix))
            .with_fade_delay(Duration::from_millis(self.fade_delay_ms))
            .with_pages(self.home_page.clone(), self.catalog_page.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.is_empty() {
            return Err(ConfigError::Invalid("key_prefix must not be empty".into()));
        }
        let s = &self.selectors;
        let required = [
            ("card", &s.card),
            ("favorite_toggle", &s.favorite_toggle),
            ("page", &s.page),
            ("container_id", &s.container_id),
            ("active_class", &s.active_class),
            ("fading_class", &s.fading_class),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("selector `{name}` must not be empty")));
        }
        self.log_filter()?;
        self.catalog_config().validate()
    }
}
