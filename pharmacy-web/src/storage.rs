//! `localStorage` backend for the pharmacy records.
use pharmacy_core::KeyValueStore;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::Storage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage is unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage read failed for {key}: {message}")]
    Read { key: String, message: String },
    #[error("localStorage write failed for {key}: {message}")]
    Write { key: String, message: String },
}

impl StorageError {
    fn read(key: &str, err: &JsValue) -> Self {
        Self::Read {
            key: key.to_string(),
            message: crate::dom::js_error_message(err),
        }
    }

    fn write(key: &str, err: &JsValue) -> Self {
        Self::Write {
            key: key.to_string(),
            message: crate::dom::js_error_message(err),
        }
    }
}

/// Handle to `window.localStorage`.
#[derive(Clone)]
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// # Errors
    ///
    /// Fails when storage is disabled, e.g. in some private browsing modes.
    pub fn new() -> Result<Self, StorageError> {
        let storage = crate::dom::local_storage()
            .map_err(|err| StorageError::Unavailable(crate::dom::js_error_message(&err)))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::read(key, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::write(key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.storage
            .remove_item(key)
            .map_err(|err| StorageError::write(key, &err))
    }
}
