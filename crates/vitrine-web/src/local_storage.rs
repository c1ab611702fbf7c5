//! `window.localStorage` as a [`PreferenceStore`].

use vitrine_core::{PreferenceStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// Origin-scoped browser storage.
pub(crate) struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Fails when the browser blocks or lacks `localStorage`.
    pub(crate) fn from_window(window: &Window) -> StorageResult<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is missing".into())),
            Err(err) => Err(StorageError::Unavailable(describe(&err))),
        }
    }
}

impl PreferenceStore for LocalStore {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Backend(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(describe(&err)))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
