//! Language resolution and the `/en/` `/pl/` routing helpers.
//!
//! Priority: a language segment at the start of the path, then a stored
//! preference, then English.

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use super::storage::{KeyValueStore, LANG_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Pl,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Pl];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Pl => "pl",
        }
    }

    /// Parse a supported language code; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "en" => Some(Lang::En),
            "pl" => Some(Lang::Pl),
            _ => None,
        }
    }

    pub fn langid(self) -> LanguageIdentifier {
        self.code().parse().unwrap_or_default()
    }

    /// Attribute carrying this language's variant (`data-en`, `data-pl`).
    pub fn data_attr(self) -> &'static str {
        match self {
            Lang::En => "data-en",
            Lang::Pl => "data-pl",
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

pub fn strip_trailing_slash(pathname: &str) -> &str {
    let trimmed = pathname.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Language named by the first path segment, if any.
pub fn path_lang(pathname: &str) -> Option<Lang> {
    let p = strip_trailing_slash(pathname);
    Lang::ALL.into_iter().find(|lang| {
        let base = format!("/{}", lang.code());
        p == base || p.starts_with(&format!("{base}/"))
    })
}

/// Home page in any of its spellings (`/`, `/index.html`, `/en`, `/pl`).
pub fn is_index_like(pathname: &str) -> bool {
    matches!(
        strip_trailing_slash(pathname),
        "/" | "/index.html" | "/en" | "/pl"
    )
}

pub fn lang_base_path(lang: Lang) -> String {
    format!("/{}/", lang.code())
}

/// `/<lang>/` plus an optional `#hash` (accepted with or without the `#`).
pub fn build_index_url(lang: Lang, hash: &str) -> String {
    let base = lang_base_path(lang);
    match hash.trim_start_matches('#') {
        "" => base,
        fragment => format!("{base}#{fragment}"),
    }
}

/// Resolve the active language. Never fails: storage errors count as "no
/// stored preference".
pub fn detect(pathname: &str, store: &dyn KeyValueStore) -> Lang {
    if let Some(lang) = path_lang(pathname) {
        return lang;
    }
    match store.get(LANG_KEY) {
        Ok(Some(stored)) => Lang::parse(&stored).unwrap_or_default(),
        Ok(None) => Lang::default(),
        Err(err) => {
            tracing::debug!(%err, "language preference unreadable");
            Lang::default()
        }
    }
}

/// Persist the preference; failures are logged and otherwise ignored.
pub fn remember(lang: Lang, store: &dyn KeyValueStore) {
    if let Err(err) = store.set(LANG_KEY, lang.code()) {
        tracing::warn!(%err, lang = lang.code(), "could not persist language preference");
    }
}
