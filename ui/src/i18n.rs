//! Internationalization (i18n) support for `forgemotion-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (asset loading + language selection)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en/forgemotion-ui.ftl   (fallback/reference)
//!   pl/forgemotion-ui.ftl
//! ```
//!
//! The site is bilingual and renders both variants side by side (header links
//! carry `data-en` and `data-pl`), so unlike a single global loader we keep
//! one loader per [`Lang`] and look messages up explicitly:
//! ```ignore
//! use ui::core::lang::Lang;
//! use ui::tr;
//! let label = tr!(Lang::Pl, "nav-home");
//! let status = tr!(Lang::En, "form-too-many-files", max = "3");
//! ```
//!
//! `tr!` expands to `fl!` and is therefore only usable inside this crate
//! (the macro reads `i18n.toml` from the calling crate's manifest dir).
use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::core::lang::Lang;

pub use i18n_embed_fl::fl; // Re-export for the `tr!` macro.

/// Language-explicit translation macro.
/// Examples:
///     tr!(lang, "nav-home")
///     tr!(lang, "form-file-type", name = file_name)
#[macro_export]
macro_rules! tr {
    ($lang:expr, $key:literal) => {
        $crate::i18n::fl!($crate::i18n::loader($lang), $key)
    };
    ($lang:expr, $key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!($crate::i18n::loader($lang), $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "forgemotion-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

static EN: Lazy<FluentLanguageLoader> = Lazy::new(|| build_loader(Lang::En));
static PL: Lazy<FluentLanguageLoader> = Lazy::new(|| build_loader(Lang::Pl));

fn build_loader(lang: Lang) -> FluentLanguageLoader {
    let fallback: LanguageIdentifier = Lang::En.langid();
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    if let Err(err) = i18n_embed::select(&loader, &Localizations, &[lang.langid()]) {
        tracing::warn!(lang = lang.code(), %err, "failed selecting language; continuing with fallback");
    }
    // Messages end up in attributes and status text; no bidi isolation marks.
    loader.set_use_isolating(false);
    loader
}

/// Loader bound to `lang`, with English as the fallback bundle.
pub fn loader(lang: Lang) -> &'static FluentLanguageLoader {
    match lang {
        Lang::En => &*EN,
        Lang::Pl => &*PL,
    }
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}
