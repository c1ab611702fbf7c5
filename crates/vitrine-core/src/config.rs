//! Catalog configuration.
//!
//! [`CatalogConfig`] gathers every constant the controller needs: store keys,
//! the fade delay, page names, and the favorite presentation. Defaults match
//! the shipped storefront markup.

use core::time::Duration;

use crate::error::ConfigError;

/// Default prefix for every persisted preference key.
pub const DEFAULT_KEY_PREFIX: &str = "sotohit";

/// Default delay between "mark fading" and "swap rendered content".
pub const DEFAULT_FADE_DELAY: Duration = Duration::from_millis(200);

/// Names of the five persisted preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub sort: String,
    pub filter: String,
    pub search: String,
    pub page: String,
    pub favorites: String,
}

impl StorageKeys {
    /// Build keys of the form `{prefix}-sort`, `{prefix}-filter`, ...
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            sort: format!("{prefix}-sort"),
            filter: format!("{prefix}-filter"),
            search: format!("{prefix}-search"),
            page: format!("{prefix}-page"),
            favorites: format!("{prefix}-favorites"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX)
    }
}

/// Presentation of the favorites badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    /// Background when at least one favorite exists.
    pub active_color: String,
    /// Background when there are no favorites.
    pub idle_color: String,
    /// Accessible label; `{count}` is replaced by the favorite count.
    pub label_template: String,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            active_color: "#E74C3C".to_string(),
            idle_color: "#95A5A6".to_string(),
            label_template: "В избранном: {count} товаров".to_string(),
        }
    }
}

/// Glyphs shown on a favorite toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteGlyphs {
    pub active: String,
    pub inactive: String,
}

impl Default for FavoriteGlyphs {
    fn default() -> Self {
        Self {
            active: "💖".to_string(),
            inactive: "❤️".to_string(),
        }
    }
}

/// Configuration for a [`CatalogController`](crate::controller::CatalogController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Persisted preference keys.
    pub keys: StorageKeys,
    /// Delay before the fading cards are swapped for the new order.
    pub fade_delay: Duration,
    /// Page shown when nothing was persisted.
    pub home_page: String,
    /// Page that owns the render container.
    pub catalog_page: String,
    /// Favorites badge presentation.
    pub badge: BadgeStyle,
    /// Favorite toggle glyphs.
    pub glyphs: FavoriteGlyphs,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            fade_delay: DEFAULT_FADE_DELAY,
            home_page: "home".to_string(),
            catalog_page: "catalog".to_string(),
            badge: BadgeStyle::default(),
            glyphs: FavoriteGlyphs::default(),
        }
    }
}

impl CatalogConfig {
    /// Override the store keys.
    #[must_use]
    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Override the fade delay.
    #[must_use]
    pub fn with_fade_delay(mut self, delay: Duration) -> Self {
        self.fade_delay = delay;
        self
    }

    /// Override the home and catalog page ids.
    #[must_use]
    pub fn with_pages(mut self, home: impl Into<String>, catalog: impl Into<String>) -> Self {
        self.home_page = home.into();
        self.catalog_page = catalog.into();
        self
    }

    /// Override the badge presentation.
    #[must_use]
    pub fn with_badge(mut self, badge: BadgeStyle) -> Self {
        self.badge = badge;
        self
    }

    /// Override the favorite glyphs.
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: FavoriteGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_page.is_empty() || self.catalog_page.is_empty() {
            return Err(ConfigError::Invalid("page ids must not be empty".into()));
        }
        let keys = [
            &self.keys.sort,
            &self.keys.filter,
            &self.keys.search,
            &self.keys.page,
            &self.keys.favorites,
        ];
        for (i, key) in keys.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigError::Invalid("storage keys must not be empty".into()));
            }
            if keys[..i].contains(key) {
                return Err(ConfigError::Invalid(format!("duplicate storage key `{key}`")));
            }
        }
        Ok(())
    }
}
