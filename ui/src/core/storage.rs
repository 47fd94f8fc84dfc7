//! Local persistence seams: key/value storage (browser local storage) and
//! first-party cookies. Writes are best effort everywhere; callers log and
//! move on when a write fails.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use thiserror::Error;

/// Storage key holding the visitor's language preference.
pub const LANG_KEY: &str = "lang";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Browser-local key/value storage (`localStorage` on the web).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// First-party cookie access (`document.cookie` on the web).
pub trait CookieStore {
    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError>;
    fn set_cookie(&self, name: &str, value: &str, max_age_days: u32) -> Result<(), StorageError>;
}

/// Extract a cookie value from a `document.cookie` style header.
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Serialize a cookie assignment: site-wide, lax, long-lived.
pub fn format_cookie(name: &str, value: &str, max_age_days: u32) -> String {
    let max_age = u64::from(max_age_days) * 24 * 60 * 60;
    format!("{name}={value}; Max-Age={max_age}; Path=/; SameSite=Lax")
}

/// In-memory store used by tests and as a stand-in when no browser storage
/// exists. `failing()` simulates storage that throws on every call
/// (e.g. Safari private mode).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.failing.set(true);
        store
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Rejected(format!("write of {key}")));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Cookie jar backed by a single header string, mirroring how
/// `document.cookie` reads back.
#[derive(Debug, Default)]
pub struct MemoryCookies {
    jar: RefCell<BTreeMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let cookies = Self::default();
        cookies.failing.set(true);
        cookies
    }

    /// Header as a browser would expose it (`a=1; b=2`).
    pub fn header(&self) -> String {
        self.jar
            .borrow()
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl CookieStore for MemoryCookies {
    fn cookie(&self, name: &str) -> Result<Option<String>, StorageError> {
        if self.failing.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(parse_cookie(&self.header(), name))
    }

    fn set_cookie(&self, name: &str, value: &str, max_age_days: u32) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Rejected(format!("cookie {name}")));
        }
        let assignment = format_cookie(name, value, max_age_days);
        // The jar only keeps the leading `name=value` pair, like the browser.
        if let Some((key, val)) = assignment.split(';').next().and_then(|p| p.split_once('=')) {
            self.jar.borrow_mut().insert(key.to_string(), val.to_string());
        }
        Ok(())
    }
}
