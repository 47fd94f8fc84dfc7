//! `localStorage` and `document.cookie` behind the ui storage traits.

use ui::core::storage::{format_cookie, parse_cookie, CookieStore, KeyValueStore, StorageError};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

/// `window.localStorage`. Accessing it can throw (private mode, disabled
/// storage); every such failure is reported as [`StorageError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

fn local_storage() -> Result<Storage, StorageError> {
    web_sys::window()
        .ok_or(StorageError::Unavailable)?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected(format!("{err:?}")))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentCookies;

fn html_document() -> Result<HtmlDocument, StorageError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
        .ok_or(StorageError::Unavailable)
}

impl CookieStore for DocumentCookies {
    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError> {
        let header = html_document()?.cookie().map_err(|_| StorageError::Unavailable)?;
        Ok(parse_cookie(&header, name))
    }

    fn set_cookie(&self, name: &str, value: &str, max_age_days: u32) -> Result<(), StorageError> {
        html_document()?
            .set_cookie(&format_cookie(name, value, max_age_days))
            .map_err(|err| StorageError::Rejected(format!("{err:?}")))
    }
}
