//! Text and `<head>` localization.
//!
//! Page copy lives in `data-en` / `data-pl` attributes on the elements
//! themselves; [`apply_texts`] copies the right variant into the element's
//! text. [`update_meta_tags`] rewrites the title, the SEO/social meta tags
//! and the canonical link from the page's [`MetaData`].

use crate::config::{MetaData, PageMeta};
use crate::core::dom::{Dom, Effect, MetaAttr, Selector, Target};
use crate::core::lang::{self, is_index_like, lang_base_path, path_lang, strip_trailing_slash, Lang};
use crate::core::location::Location;
use crate::core::storage::KeyValueStore;

const DEFAULT_AUTHOR: &str = "ForgeMotion Systems";

/// Every `[data-en]` element gets its `lang` variant, or the English one
/// when the element has no variant for `lang`.
pub fn apply_texts(dom: &dyn Dom, lang: Lang) -> Vec<Effect> {
    let selector = Selector::Attr(Lang::En.data_attr());
    let wanted = dom.attrs_of(&selector, lang.data_attr());
    let english = dom.attrs_of(&selector, Lang::En.data_attr());

    wanted
        .into_iter()
        .zip(english)
        .enumerate()
        .filter_map(|(i, (variant, fallback))| {
            variant
                .or(fallback)
                .map(|text| Effect::text(Target::Nth(selector.clone(), i), text))
        })
        .collect()
}

/// Canonical URL for the current page when the metadata does not name one.
/// Home and language-prefixed paths canonicalize to `/<lang>/`.
pub fn canonical_for(location: &Location, lang: Lang) -> String {
    let path = strip_trailing_slash(location.path());
    if is_index_like(path) || path_lang(path).is_some() {
        format!("{}{}", location.origin(), lang_base_path(lang))
    } else {
        format!("{}{}", location.origin(), location.path())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn meta(attr: MetaAttr, key: &str, content: &str) -> Effect {
    Effect::SetMeta {
        attr,
        key: key.to_string(),
        content: content.to_string(),
    }
}

/// Title, description/keywords/author, canonical, Open Graph and Twitter
/// tags. Every tag is written on every call, so nothing from a previous
/// language survives a switch.
pub fn update_meta_tags(lang: Lang, meta_data: &MetaData, location: &Location) -> Vec<Effect> {
    let empty = PageMeta::default();
    let record = meta_data.for_lang(lang).unwrap_or(&empty);

    let title = non_blank(&record.title);
    let description = non_blank(&record.description).unwrap_or_default();
    let canonical = non_blank(&record.canonical)
        .map(str::to_string)
        .unwrap_or_else(|| canonical_for(location, lang));

    let mut effects = Vec::with_capacity(16);
    if let Some(title) = title {
        effects.push(Effect::SetTitle(title.to_string()));
    }
    let title = title.unwrap_or_default();

    effects.extend([
        meta(MetaAttr::Name, "description", description),
        meta(MetaAttr::Name, "keywords", non_blank(&record.keywords).unwrap_or_default()),
        meta(MetaAttr::Name, "author", non_blank(&record.author).unwrap_or(DEFAULT_AUTHOR)),
        Effect::SetCanonical(canonical.clone()),
        meta(MetaAttr::Property, "og:title", non_blank(&record.og_title).unwrap_or(title)),
        meta(
            MetaAttr::Property,
            "og:description",
            non_blank(&record.og_description).unwrap_or(description),
        ),
        meta(MetaAttr::Property, "og:image", non_blank(&record.og_image).unwrap_or_default()),
        meta(MetaAttr::Property, "og:url", &canonical),
        meta(MetaAttr::Property, "og:type", "website"),
        meta(MetaAttr::Name, "twitter:title", non_blank(&record.twitter_title).unwrap_or(title)),
        meta(
            MetaAttr::Name,
            "twitter:description",
            non_blank(&record.twitter_description).unwrap_or(description),
        ),
        meta(MetaAttr::Name, "twitter:image", non_blank(&record.twitter_image).unwrap_or_default()),
        meta(MetaAttr::Name, "twitter:card", "summary_large_image"),
    ]);
    effects
}

/// Highlight the `[data-lang]` button of the active language.
pub fn mark_lang_buttons(dom: &dyn Dom, lang: Lang) -> Vec<Effect> {
    let selector = Selector::Attr("data-lang");
    dom.attrs_of(&selector, "data-lang")
        .into_iter()
        .enumerate()
        .map(|(i, code)| {
            let active = code.as_deref() == Some(lang.code());
            Effect::class(Target::Nth(selector.clone(), i), "nav-active", active)
        })
        .collect()
}

/// Switch the whole document to `lang`: persist the preference, set
/// `<html lang>`, swap texts and metadata, highlight the language button.
pub fn set_language(
    dom: &dyn Dom,
    store: &dyn KeyValueStore,
    lang: Lang,
    meta_data: &MetaData,
    location: &Location,
) -> Vec<Effect> {
    lang::remember(lang, store);
    tracing::debug!(lang = lang.code(), "applying language");

    let mut effects = vec![Effect::attr(Target::Root, "lang", lang.code())];
    effects.extend(apply_texts(dom, lang));
    effects.extend(update_meta_tags(lang, meta_data, location));
    effects.extend(mark_lang_buttons(dom, lang));
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};
    use crate::core::storage::{MemoryStore, LANG_KEY};

    fn bilingual_dom() -> MemoryDom {
        MemoryDom::new()
            .with(
                MemoryElement::new("h1")
                    .with_attr("data-en", "Motion simulators")
                    .with_attr("data-pl", "Symulatory ruchu"),
            )
            .with(MemoryElement::new("p").with_attr("data-en", "English only"))
            .with(MemoryElement::new("span").with_text("untouched"))
    }

    fn loc(href: &str) -> Location {
        Location::parse(href).unwrap()
    }

    #[test]
    fn texts_follow_language_with_english_fallback() {
        let mut dom = bilingual_dom();
        dom.apply_all(apply_texts(&dom, Lang::Pl));
        let sel = Selector::Attr("data-en");
        assert_eq!(dom.nth(&sel, 0).unwrap().text, "Symulatory ruchu");
        assert_eq!(dom.nth(&sel, 1).unwrap().text, "English only");

        dom.apply_all(apply_texts(&dom, Lang::En));
        assert_eq!(dom.nth(&sel, 0).unwrap().text, "Motion simulators");
    }

    #[test]
    fn canonical_for_index_like_and_other_pages() {
        assert_eq!(
            canonical_for(&loc("https://fms.example/"), Lang::Pl),
            "https://fms.example/pl/"
        );
        assert_eq!(
            canonical_for(&loc("https://fms.example/en/#about"), Lang::Pl),
            "https://fms.example/pl/"
        );
        assert_eq!(
            canonical_for(&loc("https://fms.example/products-mk14.html"), Lang::Pl),
            "https://fms.example/products-mk14.html"
        );
    }

    #[test]
    fn meta_defaults_and_fallbacks() {
        let mut meta_data = MetaData::default();
        meta_data.insert(
            Lang::En,
            PageMeta {
                title: Some("MK14".into()),
                description: Some("Compact rig".into()),
                ..PageMeta::default()
            },
        );
        let mut dom = MemoryDom::new();
        dom.apply_all(update_meta_tags(Lang::Pl, &meta_data, &loc("https://fms.example/products-mk14.html")));

        assert_eq!(dom.title(), "MK14");
        assert_eq!(dom.meta(MetaAttr::Name, "author"), Some("ForgeMotion Systems"));
        assert_eq!(dom.meta(MetaAttr::Property, "og:title"), Some("MK14"));
        assert_eq!(dom.meta(MetaAttr::Name, "twitter:description"), Some("Compact rig"));
        assert_eq!(dom.meta(MetaAttr::Property, "og:type"), Some("website"));
        assert_eq!(dom.meta(MetaAttr::Name, "twitter:card"), Some("summary_large_image"));
        assert_eq!(dom.meta(MetaAttr::Property, "og:url"), dom.canonical());
        assert_eq!(dom.canonical(), Some("https://fms.example/products-mk14.html"));
    }

    #[test]
    fn switching_language_leaves_no_stale_values() {
        let mut meta_data = MetaData::default();
        meta_data.insert(
            Lang::En,
            PageMeta {
                title: Some("Home".into()),
                keywords: Some("simulator".into()),
                og_image: Some("/og-en.jpg".into()),
                ..PageMeta::default()
            },
        );
        meta_data.insert(Lang::Pl, PageMeta { title: Some("Start".into()), ..PageMeta::default() });
        let location = loc("https://fms.example/");
        let mut dom = MemoryDom::new();

        dom.apply_all(update_meta_tags(Lang::En, &meta_data, &location));
        assert_eq!(dom.meta(MetaAttr::Name, "keywords"), Some("simulator"));

        dom.apply_all(update_meta_tags(Lang::Pl, &meta_data, &location));
        assert_eq!(dom.title(), "Start");
        assert_eq!(dom.meta(MetaAttr::Name, "keywords"), Some(""));
        assert_eq!(dom.meta(MetaAttr::Property, "og:image"), Some(""));
        assert_eq!(dom.canonical(), Some("https://fms.example/pl/"));
    }

    #[test]
    fn meta_update_is_idempotent() {
        let mut meta_data = MetaData::default();
        meta_data.insert(Lang::Pl, PageMeta { title: Some("Start".into()), ..PageMeta::default() });
        let location = loc("https://fms.example/pl/");
        let mut dom = MemoryDom::new();

        let first = update_meta_tags(Lang::Pl, &meta_data, &location);
        dom.apply_all(first.clone());
        let count = dom.meta_count();
        let second = update_meta_tags(Lang::Pl, &meta_data, &location);
        assert_eq!(first, second);
        dom.apply_all(second);
        assert_eq!(dom.meta_count(), count);
        assert_eq!(dom.title(), "Start");
    }

    #[test]
    fn set_language_persists_and_marks_root_and_button() {
        let mut dom = bilingual_dom()
            .with(MemoryElement::new("button").with_attr("data-lang", "en"))
            .with(MemoryElement::new("button").with_attr("data-lang", "pl"));
        let store = MemoryStore::new();
        let effects = set_language(&dom, &store, Lang::Pl, &MetaData::default(), &loc("https://fms.example/pl/"));
        dom.apply_all(effects);

        assert_eq!(store.get(LANG_KEY).unwrap().as_deref(), Some("pl"));
        assert_eq!(dom.root().attr("lang"), Some("pl"));
        let buttons = Selector::Attr("data-lang");
        assert!(!dom.nth(&buttons, 0).unwrap().has_class("nav-active"));
        assert!(dom.nth(&buttons, 1).unwrap().has_class("nav-active"));
    }
}
