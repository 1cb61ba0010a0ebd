//! `localStorage` backend for the core store.
use crate::dom;
use tripbudget_core::{KeyValueStorage, StorageError};
use web_sys::Storage;

/// Slots in the page's `localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

fn browser_storage() -> Result<Storage, StorageError> {
    dom::local_storage().ok_or_else(|| StorageError::Backend("localStorage unavailable".into()))
}

fn backend_error(value: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(dom::js_error_message(value))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        browser_storage()?
            .get_item(key)
            .map_err(|err| backend_error(&err))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        browser_storage()?
            .set_item(key, value)
            .map_err(|err| backend_error(&err))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        browser_storage()?
            .remove_item(key)
            .map_err(|err| backend_error(&err))
    }
}
