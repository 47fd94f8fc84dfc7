//! End-to-end page flows against the in-memory document.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ui::config::{ManifestConfig, SiteOptions};
use ui::core::dom::{Dom, Selector, Target};
use ui::core::fetch::{FetchError, HttpClient, HttpResponse};
use ui::core::location::Location;
use ui::core::memory::{MemoryDom, MemoryElement};
use ui::core::storage::{KeyValueStore, MemoryStore};
use ui::layout::modal_ids as ids;
use ui::modal::{GalleryImage, ImageModalEvent, ImageTrigger};
use ui::nav::{AnchorClick, SectionSample};
use ui::videos::hydrate::{HERO_PLAYER_ID, MORE_DEMOS_ID, VIDEO_KEY_ATTR};
use ui::{AppContext, PageEvent, SiteLayout};

struct StaticClient {
    body: Result<HttpResponse, FetchError>,
    urls: RefCell<Vec<String>>,
}

impl HttpClient for StaticClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.urls.borrow_mut().push(url.to_string());
        self.body.clone()
    }
}

fn home_page() -> MemoryDom {
    let mut dom = MemoryDom::new();
    for section in ["hero", "products", "about", "contact"] {
        dom.push(MemoryElement::new("section").with_id(section));
        dom.push(
            MemoryElement::new("a")
                .with_class("site-nav-link")
                .with_attr("href", &format!("/en/#{section}")),
        );
    }
    dom.push(MemoryElement::new("video").with_id(HERO_PLAYER_ID));
    dom.push(MemoryElement::new("button").with_attr(VIDEO_KEY_ATTR, "6dof"));
    dom.push(MemoryElement::new("button").with_attr(VIDEO_KEY_ATTR, "belt"));
    dom.push(MemoryElement::new("section").with_id(MORE_DEMOS_ID).with_class("hidden"));
    dom.push(MemoryElement::new("div").with_id(ids::VIDEO_MODAL).with_class("modal-hidden"));
    dom.push(MemoryElement::new("video").with_id(ids::VIDEO_PLAYER));
    dom.push(MemoryElement::new("h2").with_id(ids::VIDEO_TITLE));
    dom.push(MemoryElement::new("button").with_id(ids::VIDEO_CLOSE));
    dom
}

fn context(href: &str, options: SiteOptions) -> AppContext {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    AppContext::new(Location::parse(href).unwrap(), store, options)
}

fn link_active(dom: &MemoryDom, index: usize) -> bool {
    dom.nth(&Selector::Class("site-nav-link"), index).unwrap().has_class("nav-active")
}

#[test]
fn scrollspy_follows_the_most_visible_section() {
    let mut dom = home_page();
    let mut site = SiteLayout::init(&mut dom, context("https://fms.example/en/", SiteOptions::default()));
    assert_eq!(site.scrollspy().and_then(|s| s.active()), Some("hero"));

    let sample = |id: &str, ratio: f64| SectionSample { id: id.into(), intersecting: true, ratio };
    site.handle(
        &mut dom,
        PageEvent::Intersections(vec![sample("hero", 0.1), sample("products", 0.65), sample("about", 0.2)]),
    );

    let active: Vec<bool> = (0..4).map(|i| link_active(&dom, i)).collect();
    assert_eq!(active, [false, true, false, false]);
    let products = dom.nth(&Selector::Class("site-nav-link"), 1).unwrap();
    assert_eq!(products.attr("aria-current"), Some("page"));
}

#[test]
fn anchor_clicks_scroll_in_page_only() {
    let mut dom = home_page();
    let mut site = SiteLayout::init(&mut dom, context("https://fms.example/en/", SiteOptions::default()));

    let click = |href: &str| AnchorClick { href: href.into(), ..AnchorClick::default() };
    assert!(site.handle(&mut dom, PageEvent::Anchor(click("#contact"))));
    assert_eq!(dom.scrolled_to(), ["contact".to_string()]);
    assert_eq!(dom.history(), ["#contact".to_string()]);

    assert!(!site.handle(&mut dom, PageEvent::Anchor(click("/pl/#contact"))));
    assert!(!site.handle(&mut dom, PageEvent::Anchor(click("https://other.example/en/#contact"))));
    let modified = AnchorClick { modifiers: true, ..click("#about") };
    assert!(!site.handle(&mut dom, PageEvent::Anchor(modified)));
    assert_eq!(dom.scrolled_to().len(), 1);
}

#[tokio::test]
async fn belt_only_manifest_hydrates_and_plays_through_the_modal() {
    let options = SiteOptions {
        include_video_modal: true,
        video_manifest: Some(ManifestConfig::default()),
        ..SiteOptions::default()
    };
    let mut dom = home_page();
    let mut site = SiteLayout::init(&mut dom, context("https://fms.example/en/", options));
    let client = StaticClient {
        body: Ok(HttpResponse::json(200, r#"{ "belt": [{ "src": "belt.mp4", "title": "Belt rig" }] }"#)),
        urls: RefCell::new(Vec::new()),
    };

    site.hydrate_videos(&mut dom, &client).await;

    assert_eq!(client.urls.borrow().len(), 1);
    assert!(dom.element(HERO_PLAYER_ID).unwrap().attr("src").is_none());
    let button = |key: &str| dom.nth(&Selector::AttrValue(VIDEO_KEY_ATTR, key.into()), 0).unwrap().disabled;
    assert!(!button("belt"));
    assert!(button("6dof"));
    assert!(!dom.element(MORE_DEMOS_ID).unwrap().has_class("hidden"));

    assert!(site.handle(&mut dom, PageEvent::DemoButton("belt".into())));
    assert!(site.video_modal().is_some_and(|m| m.is_open()));
    assert_eq!(dom.element(ids::VIDEO_PLAYER).unwrap().attr("src"), Some("belt.mp4"));
    assert_eq!(dom.element(ids::VIDEO_TITLE).unwrap().text, "Belt rig");

    site.handle(&mut dom, PageEvent::Escape);
    assert!(dom.element(ids::VIDEO_MODAL).unwrap().has_class("modal-hidden"));
    assert!(dom.element(ids::VIDEO_PLAYER).unwrap().attr("src").is_none());

    assert!(!site.handle(&mut dom, PageEvent::DemoButton("6dof".into())));
}

#[tokio::test]
async fn unreachable_manifest_disables_every_demo() {
    let mut dom = home_page();
    let mut site = SiteLayout::init(&mut dom, context("https://fms.example/pl/", SiteOptions::default()));
    let client = StaticClient {
        body: Err(FetchError::Network("offline".into())),
        urls: RefCell::new(Vec::new()),
    };

    site.hydrate_videos(&mut dom, &client).await;

    assert!(client.urls.borrow().len() > 1, "every candidate is tried");
    let buttons = Selector::Attr(VIDEO_KEY_ATTR);
    for i in 0..2 {
        assert!(dom.nth(&buttons, i).unwrap().disabled);
    }
    assert!(dom.element(MORE_DEMOS_ID).unwrap().has_class("hidden"));
}

#[test]
fn gallery_navigation_wraps_through_the_router() {
    let gallery: Vec<GalleryImage> = (0..4)
        .map(|i| GalleryImage { src: format!("rig-{i}.jpg"), alt: None })
        .collect();
    let options = SiteOptions {
        include_modal: true,
        galleries: BTreeMap::from([("rig".to_string(), gallery)]),
        ..SiteOptions::default()
    };
    let mut dom = MemoryDom::new()
        .with(MemoryElement::new("div").with_id(ids::IMAGE_MODAL).with_class("modal-hidden"))
        .with(MemoryElement::new("img").with_id(ids::IMAGE))
        .with(MemoryElement::new("button").with_id(ids::IMAGE_CLOSE))
        .with(MemoryElement::new("button").with_id(ids::IMAGE_PREV))
        .with(MemoryElement::new("button").with_id(ids::IMAGE_NEXT))
        .with(MemoryElement::new("span").with_id(ids::IMAGE_COUNTER));
    let mut site = SiteLayout::init(&mut dom, context("https://fms.example/products-6dof.html", options));

    let open = ImageTrigger {
        src: "rig-0.jpg".into(),
        alt: String::new(),
        gallery: Some("rig".into()),
        index: Some(0),
    };
    site.handle(&mut dom, PageEvent::Image(ImageModalEvent::Open(open)));
    for _ in 0..4 {
        site.handle(&mut dom, PageEvent::Image(ImageModalEvent::Next));
    }
    assert_eq!(site.image_modal().map(|m| m.index()), Some(0));
    assert_eq!(dom.element(ids::IMAGE).unwrap().attr("src"), Some("rig-0.jpg"));
    assert_eq!(dom.element(ids::IMAGE_COUNTER).unwrap().text, "1 / 4");

    site.handle(&mut dom, PageEvent::Escape);
    assert!(dom.has_class(&Target::id(ids::IMAGE_MODAL), "modal-hidden"));
    assert_eq!(dom.element(ids::IMAGE).unwrap().attr("src"), Some(""));
}
