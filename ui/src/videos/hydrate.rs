use dioxus::prelude::*;

use super::manifest::{parse_manifest, VideoCatalog, VideoDescriptor};
use crate::config::ManifestConfig;
use crate::core::dom::{Dom, Effect, Selector, Target, VideoAction};
use crate::core::fetch::{fetch_first, FetchError, HttpClient, HttpResponse};
use crate::core::lang::Lang;
use crate::core::location::Location;
use crate::modal::VideoClip;
use crate::tr;

pub const HERO_PLAYER_ID: &str = "heroVideo";
pub const MORE_DEMOS_ID: &str = "moreDemos";
pub const MORE_DEMOS_LIST_ID: &str = "moreDemosList";
/// Demo buttons name their topic in this attribute.
pub const VIDEO_KEY_ATTR: &str = "data-video-key";
/// "More demos" cards carry their position in [`VideoCatalog::extras`].
pub const DEMO_INDEX_ATTR: &str = "data-demo-index";

/// Manifest URL first, then the relative fallbacks resolved against the
/// current page. Cross-origin and duplicate candidates are dropped.
pub fn candidate_urls(config: &ManifestConfig, location: &Location) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for reference in std::iter::once(&config.path).chain(&config.fallbacks) {
        let Some(url) = location.resolve(reference) else {
            continue;
        };
        if !location.same_origin(&url) {
            tracing::debug!(%url, "skipping cross-origin manifest candidate");
            continue;
        }
        let url = url.to_string();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

fn parse_response(response: &HttpResponse) -> Result<VideoCatalog, FetchError> {
    parse_manifest(&response.body)
}

/// Fetch and normalize the manifest. Any failure means "no videos".
pub async fn load_catalog<C: HttpClient>(client: &C, config: &ManifestConfig, location: &Location) -> VideoCatalog {
    let candidates = candidate_urls(config, location);
    match fetch_first(client, &candidates, config.timeout_ms, parse_response).await {
        Ok(catalog) => {
            tracing::debug!(topics = catalog.keys().count(), "video manifest loaded");
            catalog
        }
        Err(err) => {
            tracing::warn!(%err, "video manifest unavailable; demos disabled");
            VideoCatalog::default()
        }
    }
}

/// Modal payload for a clip, with title resolved for `lang`.
pub fn clip_for(video: &VideoDescriptor, lang: Lang) -> VideoClip {
    VideoClip {
        src: video.src.clone(),
        poster: video.poster.clone(),
        title: video.title.resolve(lang).to_string(),
    }
}

/// First clip of a demo button's topic.
pub fn demo_clip(catalog: &VideoCatalog, key: &str, lang: Lang) -> Option<VideoClip> {
    catalog.first(key).map(|video| clip_for(video, lang))
}

/// Clip behind the `index`th "more demos" card.
pub fn extra_clip(catalog: &VideoCatalog, index: usize, lang: Lang) -> Option<VideoClip> {
    catalog.extras().nth(index).map(|video| clip_for(video, lang))
}

#[derive(Clone, PartialEq)]
struct DemoCardData {
    index: usize,
    /// Empty when the clip has no poster.
    poster: String,
    title: String,
    desc: String,
}

#[component]
fn DemoCards(cards: Vec<DemoCardData>, play_label: String) -> Element {
    rsx! {
        for card in cards.iter() {
            button {
                key: "{card.index}",
                r#type: "button",
                class: "demo-card text-left bg-gray-800/60 border border-white/5 rounded-xl overflow-hidden hover:border-blue-400/60 focus:outline-none focus:ring-2 focus:ring-blue-400/60",
                "data-demo-index": "{card.index}",
                aria_label: "{play_label}: {card.title}",
                if !card.poster.is_empty() {
                    img { class: "w-full aspect-video object-cover", src: "{card.poster}", alt: "{card.title}", "loading": "lazy" }
                } else {
                    div { class: "w-full aspect-video bg-gray-900 flex items-center justify-center text-3xl", "▶" }
                }
                div { class: "p-4",
                    h3 { class: "font-semibold", "{card.title}" }
                    if !card.desc.is_empty() {
                        p { class: "text-sm text-gray-400 mt-1", "{card.desc}" }
                    }
                }
            }
        }
    }
}

pub fn render_demo_cards(catalog: &VideoCatalog, lang: Lang) -> String {
    let cards: Vec<DemoCardData> = catalog
        .extras()
        .enumerate()
        .map(|(index, video)| DemoCardData {
            index,
            poster: video.poster.clone().unwrap_or_default(),
            title: video.title.resolve(lang).to_string(),
            desc: video.desc.resolve(lang).to_string(),
        })
        .collect();
    let play_label = tr!(lang, "video-play");
    dioxus_ssr::render_element(rsx! { DemoCards { cards, play_label } })
}

fn set_button(target: Target, enabled: bool, lang: Lang) -> Vec<Effect> {
    let mut effects = vec![
        Effect::SetDisabled { target: target.clone(), disabled: !enabled },
        Effect::class(target.clone(), "opacity-50", !enabled),
        Effect::class(target.clone(), "cursor-not-allowed", !enabled),
    ];
    if enabled {
        effects.push(Effect::remove_attr(target.clone(), "aria-disabled"));
        effects.push(Effect::remove_attr(target, "title"));
    } else {
        effects.push(Effect::attr(target.clone(), "aria-disabled", "true"));
        effects.push(Effect::attr(target, "title", tr!(lang, "video-coming-soon")));
    }
    effects
}

/// Bind the catalog to the page: hero player, demo buttons, "more demos".
/// An empty catalog disables every button and hides the section.
pub fn hydrate(dom: &dyn Dom, catalog: &VideoCatalog, lang: Lang) -> Vec<Effect> {
    let mut effects = Vec::new();

    let hero = Target::id(HERO_PLAYER_ID);
    if let (true, Some(video)) = (dom.exists(&hero), catalog.hero()) {
        effects.push(Effect::attr(hero.clone(), "src", video.src.clone()));
        if let Some(poster) = &video.poster {
            effects.push(Effect::attr(hero.clone(), "poster", poster.clone()));
        }
        effects.push(Effect::Video { target: hero, action: VideoAction::Load });
    }
    effects.extend(relabel(dom, catalog, lang));
    effects
}

/// Demo buttons and "more demos" cards for `lang`. Leaves the hero player
/// alone so a language switch does not restart it.
pub fn relabel(dom: &dyn Dom, catalog: &VideoCatalog, lang: Lang) -> Vec<Effect> {
    let mut effects = Vec::new();
    let buttons = Selector::Attr(VIDEO_KEY_ATTR);
    for (i, key) in dom.attrs_of(&buttons, VIDEO_KEY_ATTR).into_iter().enumerate() {
        let enabled = key.is_some_and(|key| !catalog.clips(key.trim()).is_empty());
        effects.extend(set_button(Target::Nth(buttons.clone(), i), enabled, lang));
    }

    let section = Target::id(MORE_DEMOS_ID);
    let list = Target::id(MORE_DEMOS_LIST_ID);
    let has_extras = catalog.extras().next().is_some();
    if dom.exists(&list) {
        let html = if has_extras { render_demo_cards(catalog, lang) } else { String::new() };
        effects.push(Effect::SetHtml { target: list, html });
    }
    if dom.exists(&section) {
        effects.push(Effect::class(section, "hidden", !has_extras));
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};
    use std::cell::RefCell;

    fn page() -> MemoryDom {
        MemoryDom::new()
            .with(MemoryElement::new("video").with_id(HERO_PLAYER_ID))
            .with(MemoryElement::new("button").with_attr(VIDEO_KEY_ATTR, "6dof"))
            .with(MemoryElement::new("button").with_attr(VIDEO_KEY_ATTR, "belt"))
            .with(MemoryElement::new("button").with_attr(VIDEO_KEY_ATTR, "mk14"))
            .with(MemoryElement::new("section").with_id(MORE_DEMOS_ID).with_class("hidden"))
            .with(MemoryElement::new("div").with_id(MORE_DEMOS_LIST_ID))
    }

    fn button<'a>(dom: &'a MemoryDom, key: &str) -> &'a MemoryElement {
        dom.nth(&Selector::AttrValue(VIDEO_KEY_ATTR, key.into()), 0).unwrap()
    }

    #[test]
    fn belt_only_manifest() {
        let catalog = parse_manifest(r#"{ "belt": [{ "src": "a.mp4" }] }"#).unwrap();
        let mut dom = page();
        dom.apply_all(hydrate(&dom, &catalog, Lang::En));

        let hero = dom.element(HERO_PLAYER_ID).unwrap();
        assert_eq!(hero.attr("src"), None);
        assert!(hero.video_log.is_empty());

        assert!(!button(&dom, "belt").disabled);
        assert!(button(&dom, "6dof").disabled);
        assert!(button(&dom, "mk14").disabled);
        assert_eq!(button(&dom, "6dof").attr("title"), Some("Demo video coming soon"));
        assert_eq!(button(&dom, "6dof").attr("aria-disabled"), Some("true"));

        assert!(!dom.element(MORE_DEMOS_ID).unwrap().has_class("hidden"));
        let html = &dom.element(MORE_DEMOS_LIST_ID).unwrap().html;
        assert_eq!(html.matches("data-demo-index=").count(), 1);
        assert_eq!(extra_clip(&catalog, 0, Lang::En).map(|c| c.src), Some("a.mp4".into()));
    }

    #[test]
    fn hero_clip_is_not_repeated_in_more_demos() {
        let catalog = parse_manifest(
            r#"{ "6dof": [
                { "src": "hero.mp4", "poster": "hero.jpg" },
                { "src": "second.mp4", "title": { "en": "Track day", "pl": "Dzień na torze" }, "desc": "Full lap" }
            ] }"#,
        )
        .unwrap();
        let mut dom = page();
        dom.apply_all(hydrate(&dom, &catalog, Lang::Pl));

        let hero = dom.element(HERO_PLAYER_ID).unwrap();
        assert_eq!(hero.attr("src"), Some("hero.mp4"));
        assert_eq!(hero.attr("poster"), Some("hero.jpg"));
        assert_eq!(hero.video_log, [VideoAction::Load]);

        let html = &dom.element(MORE_DEMOS_LIST_ID).unwrap().html;
        assert_eq!(html.matches("data-demo-index=").count(), 1);
        assert!(html.contains("Dzień na torze"));
        assert!(html.contains("Full lap"));
        assert_eq!(button(&dom, "6dof").attr("title"), None);
    }

    #[test]
    fn only_hero_hides_more_demos() {
        let catalog = parse_manifest(r#"{ "6dof": [{ "src": "hero.mp4" }] }"#).unwrap();
        let mut dom = page();
        dom.apply_all(hydrate(&dom, &catalog, Lang::En));
        assert!(dom.element(MORE_DEMOS_ID).unwrap().has_class("hidden"));
        assert!(dom.element(MORE_DEMOS_LIST_ID).unwrap().html.is_empty());
    }

    #[test]
    fn empty_catalog_disables_everything() {
        let mut dom = page();
        dom.apply_all(hydrate(&dom, &VideoCatalog::default(), Lang::Pl));
        for key in ["6dof", "belt", "mk14"] {
            assert!(button(&dom, key).disabled, "{key}");
            assert_eq!(button(&dom, key).attr("title"), Some("Film demo już wkrótce"));
        }
        assert!(dom.element(MORE_DEMOS_ID).unwrap().has_class("hidden"));
        assert!(dom.element(HERO_PLAYER_ID).unwrap().attr("src").is_none());
    }

    #[test]
    fn relabel_switches_tooltips_and_cards_without_reloading_the_hero() {
        let catalog = parse_manifest(
            r#"{ "6dof": [
                { "src": "hero.mp4" },
                { "src": "second.mp4", "title": { "en": "Track day", "pl": "Dzień na torze" } }
            ] }"#,
        )
        .unwrap();
        let mut dom = page();
        dom.apply_all(hydrate(&dom, &catalog, Lang::En));
        assert_eq!(button(&dom, "belt").attr("title"), Some("Demo video coming soon"));

        dom.apply_all(relabel(&dom, &catalog, Lang::Pl));
        assert_eq!(button(&dom, "belt").attr("title"), Some("Film demo już wkrótce"));
        let html = &dom.element(MORE_DEMOS_LIST_ID).unwrap().html;
        assert!(html.contains("Dzień na torze"));
        assert!(!html.contains("Track day"));
        assert_eq!(dom.element(HERO_PLAYER_ID).unwrap().video_log, [VideoAction::Load]);
    }

    #[test]
    fn candidates_are_same_origin_and_unique() {
        let location = Location::parse("https://fms.example/en/products-6dof.html").unwrap();
        let config = ManifestConfig {
            fallbacks: vec![
                "videos/videos.json".into(),
                "/videos/videos.json".into(),
                "https://cdn.example/videos.json".into(),
            ],
            ..ManifestConfig::default()
        };
        assert_eq!(
            candidate_urls(&config, &location),
            [
                "https://fms.example/videos/videos.json",
                "https://fms.example/en/videos/videos.json",
            ]
        );
    }

    struct Client {
        body: Result<HttpResponse, FetchError>,
        calls: RefCell<usize>,
    }

    impl HttpClient for Client {
        async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            *self.calls.borrow_mut() += 1;
            self.body.clone()
        }
    }

    #[tokio::test]
    async fn load_failures_mean_no_videos() {
        let location = Location::parse("https://fms.example/").unwrap();
        let config = ManifestConfig::default();

        for body in [
            Err(FetchError::Network("offline".into())),
            Ok(HttpResponse::new(500, None, "")),
            Ok(HttpResponse::json(200, "{ broken")),
        ] {
            let client = Client { body, calls: RefCell::new(0) };
            assert!(load_catalog(&client, &config, &location).await.is_empty());
            assert!(*client.calls.borrow() >= 1);
        }

        let client = Client {
            body: Ok(HttpResponse::json(200, r#"{ "belt": ["a.mp4"] }"#)),
            calls: RefCell::new(0),
        };
        let catalog = load_catalog(&client, &config, &location).await;
        assert_eq!(catalog.clips("belt").len(), 1);
        assert_eq!(*client.calls.borrow(), 1);
    }
}
