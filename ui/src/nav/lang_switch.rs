use crate::core::lang::{build_index_url, is_index_like, path_lang, Lang};
use crate::core::location::Location;

/// What a click on a `[data-lang]` button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangSwitch {
    /// Home pages exist per language: go to `/<lang>/`, keeping the hash.
    Navigate { lang: Lang, url: String },
    /// Other pages switch texts and metadata without reloading.
    InPlace(Lang),
}

/// `None` for an unsupported `data-lang` value.
pub fn lang_switch(code: &str, location: &Location) -> Option<LangSwitch> {
    let lang = Lang::parse(code)?;
    let path = location.path();
    if is_index_like(path) || path_lang(path).is_some() {
        Some(LangSwitch::Navigate {
            lang,
            url: build_index_url(lang, location.hash()),
        })
    } else {
        Some(LangSwitch::InPlace(lang))
    }
}
