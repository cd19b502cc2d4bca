//! Browser storage, clock and history adapters for the authgate seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! These adapters centralize csr-only web-sys glue so the core crate stays
//! browser-agnostic. Outside the browser every store reports
//! `StoreError::Unavailable`, which the core already treats as advisory.

use authgate::{Clock, KeyValueStore, StoreError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StorageArea {
    Local,
    Session,
}

#[cfg(feature = "csr")]
fn storage(area: StorageArea) -> Result<web_sys::Storage, StoreError> {
    let window = web_sys::window().ok_or(StoreError::Unavailable)?;
    let storage = match area {
        StorageArea::Local => window.local_storage(),
        StorageArea::Session => window.session_storage(),
    };
    storage.ok().flatten().ok_or(StoreError::Unavailable)
}

/// Map a DOM exception from `setItem` to a store error.
#[cfg(any(test, feature = "csr"))]
fn classify_write_error(name: &str) -> StoreError {
    match name {
        "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED" => StoreError::QuotaExceeded,
        "SecurityError" => StoreError::Unavailable,
        other => StoreError::Backend(other.to_owned()),
    }
}

#[cfg(feature = "csr")]
fn write_error(err: &wasm_bindgen::JsValue) -> StoreError {
    use wasm_bindgen::JsCast;
    let name = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.name()))
        .unwrap_or_default();
    classify_write_error(&name)
}

fn get_item(area: StorageArea, key: &str) -> Result<Option<String>, StoreError> {
    #[cfg(feature = "csr")]
    {
        storage(area)?.get_item(key).map_err(|e| write_error(&e))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key);
        Err(StoreError::Unavailable)
    }
}

fn set_item(area: StorageArea, key: &str, value: &str) -> Result<(), StoreError> {
    #[cfg(feature = "csr")]
    {
        storage(area)?.set_item(key, value).map_err(|e| write_error(&e))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key, value);
        Err(StoreError::Unavailable)
    }
}

fn remove_item(area: StorageArea, key: &str) -> Result<(), StoreError> {
    #[cfg(feature = "csr")]
    {
        storage(area)?.remove_item(key).map_err(|e| write_error(&e))
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (area, key);
        Err(StoreError::Unavailable)
    }
}

/// `localStorage`: survives tabs and restarts.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        get_item(StorageArea::Local, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        set_item(StorageArea::Local, key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        remove_item(StorageArea::Local, key)
    }
}

/// `sessionStorage`: scoped to one tab, survives reloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStorageStore;

impl KeyValueStore for SessionStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        get_item(StorageArea::Session, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        set_item(StorageArea::Session, key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        remove_item(StorageArea::Session, key)
    }
}

/// `Date.now()` clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        #[cfg(feature = "csr")]
        {
            js_sys::Date::now() as u64
        }
        #[cfg(not(feature = "csr"))]
        {
            0
        }
    }
}

/// Current `location.pathname`, or `/` outside the browser.
pub fn current_path() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_owned())
    }
    #[cfg(not(feature = "csr"))]
    {
        "/".to_owned()
    }
}

/// Current `location.origin`, used to build email redirect links.
pub fn origin() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}

/// Current `location.hash`, including the leading `#`.
pub fn fragment() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}

/// `history.replaceState` to `path` without notifying the router.
pub fn replace_path(path: &str) {
    #[cfg(feature = "csr")]
    {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path)) {
            tracing::warn!(path, error = ?e, "history.replaceState failed");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = path;
    }
}

/// `true` when the document is currently hidden.
pub fn document_hidden() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.document())
            .is_some_and(|d| d.visibility_state() == web_sys::VisibilityState::Hidden)
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

#[cfg(test)]
#[path = "browser_test.rs"]
mod browser_test;
