//! Preference persistence.
//!
//! [`PreferenceStore`] is the string key/value contract the host provides
//! (browser `localStorage` on the web). [`Preferences`] layers the five typed
//! catalog preferences on top of it with write-through setters.
//!
//! # Failure policy
//!
//! Store failures never reach the shopper. A failed read is treated as an
//! absent key and the default is used; a failed write is logged and the
//! in-memory value stays authoritative for the rest of the visit.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::config::StorageKeys;
use crate::error::{StorageError, StorageResult};
use crate::favorites::FavoriteSet;
use crate::state::{CategoryFilter, SortMode, ViewState};

/// String key/value store that survives reloads.
pub trait PreferenceStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read `key`. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// In-memory store for tests and hosts without persistent storage.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> StorageResult<HashMap<String, String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.clone())
    }
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .data
            .read()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| StorageError::Corruption("lock poisoned".into()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.data.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStore")
            .field("entries", &count)
            .finish()
    }
}

/// Typed view over the five persisted preferences.
pub struct Preferences<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: PreferenceStore> Preferences<S> {
    #[must_use]
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Load the view state, falling back to defaults per field.
    ///
    /// Empty stored values count as absent, matching how the page script
    /// treated them.
    #[must_use]
    pub fn load_view_state(&self, home_page: &str) -> ViewState {
        let mut state = ViewState::new(home_page);
        if let Some(sort) = self.read(&self.keys.sort) {
            state.sort = SortMode::parse(&sort);
        }
        if let Some(filter) = self.read(&self.keys.filter) {
            state.filter = CategoryFilter::parse(&filter);
        }
        if let Some(search) = self.read(&self.keys.search) {
            state.search = search;
        }
        if let Some(page) = self.read(&self.keys.page) {
            state.page = page;
        }
        state
    }

    /// Load favorites; malformed data yields the empty set.
    #[must_use]
    pub fn load_favorites(&self) -> FavoriteSet {
        self.read(&self.keys.favorites)
            .map(|raw| FavoriteSet::from_json(&raw))
            .unwrap_or_default()
    }

    pub fn persist_sort(&self, sort: SortMode) {
        self.write(&self.keys.sort, sort.as_str());
    }

    pub fn persist_filter(&self, filter: &CategoryFilter) {
        self.write(&self.keys.filter, filter.as_str());
    }

    pub fn persist_search(&self, search: &str) {
        self.write(&self.keys.search, search);
    }

    pub fn persist_page(&self, page: &str) {
        self.write(&self.keys.page, page);
    }

    pub fn persist_favorites(&self, favorites: &FavoriteSet) {
        self.write(&self.keys.favorites, &favorites.to_json());
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                warn!(store = self.store.name(), key, error = %err, "preference read failed, using default");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        match self.store.set(key, value) {
            Ok(()) => debug!(store = self.store.name(), key, "preference saved"),
            Err(err) => {
                warn!(store = self.store.name(), key, error = %err, "preference write failed");
            }
        }
    }
}

impl<S: PreferenceStore> fmt::Debug for Preferences<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preferences")
            .field("store", &self.store.name())
            .field("keys", &self.keys)
            .finish()
    }
}
