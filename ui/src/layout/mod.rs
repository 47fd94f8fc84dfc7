//! Shared header/footer/modal markup and its injection into page slots.
//!
//! Markup is authored as Dioxus components and rendered to HTML fragments
//! with `dioxus-ssr`; the fragments are then placed into the page's slot
//! elements (`#siteHeader`, `#siteFooter`, `#siteModal`, `#siteVideoModal`)
//! or, when a slot is missing, at the start/end of `<body>`.

mod banner;
mod header;
mod modals;
mod products;
mod styles;

use dioxus::prelude::*;

use crate::config::SiteOptions;
use crate::core::dom::{Dom, Effect, InsertAt, Target};
use crate::core::lang::Lang;

pub use banner::{ACCEPT_ID, BANNER_ID, REJECT_ID};
pub use header::NAV_SECTIONS;
pub use modals::ids as modal_ids;
pub use products::{product_label, Product, PRODUCTS};
pub use styles::{global_css, STYLE_ID};

pub const HEADER_SLOT: &str = "siteHeader";
pub const FOOTER_SLOT: &str = "siteFooter";
pub const IMAGE_MODAL_SLOT: &str = "siteModal";
pub const VIDEO_MODAL_SLOT: &str = "siteVideoModal";
pub const OTHER_PRODUCTS_SLOT: &str = "otherProducts";

/// The subset of page options the injector cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    pub include_image_modal: bool,
    pub include_video_modal: bool,
    pub active_product_key: Option<String>,
    pub inject_other_products: bool,
}

impl From<&SiteOptions> for LayoutConfig {
    fn from(options: &SiteOptions) -> Self {
        Self {
            include_image_modal: options.include_modal,
            include_video_modal: options.include_video_modal,
            active_product_key: options.active_product_key.clone(),
            inject_other_products: options.inject_other_products,
        }
    }
}

impl LayoutConfig {
    pub fn any_modal(&self) -> bool {
        self.include_image_modal || self.include_video_modal
    }
}

pub fn render_header(lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { header::SiteHeader { lang } })
}

pub fn render_footer(lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { header::SiteFooter { lang } })
}

pub fn render_image_modal(lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { modals::ImageModalMarkup { lang } })
}

pub fn render_video_modal(lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { modals::VideoModalMarkup { lang } })
}

pub fn render_other_products(active: Option<String>, lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { products::OtherProducts { active, lang } })
}

pub fn render_cookie_banner(lang: Lang) -> String {
    dioxus_ssr::render_element(rsx! { banner::CookieBannerMarkup { lang } })
}

/// Style block, unless a previous init already added it.
pub fn ensure_global_styles(dom: &dyn Dom, include_modal: bool) -> Vec<Effect> {
    if dom.exists(&Target::id(STYLE_ID)) {
        return Vec::new();
    }
    vec![Effect::AppendStyle {
        id: STYLE_ID.to_string(),
        css: global_css(include_modal),
    }]
}

fn place(dom: &dyn Dom, slot: &str, fallback: InsertAt, html: String) -> Effect {
    let target = Target::id(slot);
    if dom.exists(&target) {
        Effect::SetHtml { target, html }
    } else {
        Effect::InsertHtml { at: fallback, html }
    }
}

/// Header, footer and (optionally) modal markup for `lang`.
pub fn inject(dom: &dyn Dom, config: &LayoutConfig, lang: Lang) -> Vec<Effect> {
    let mut effects = vec![
        place(dom, HEADER_SLOT, InsertAt::BodyStart, render_header(lang)),
        place(dom, FOOTER_SLOT, InsertAt::BodyEnd, render_footer(lang)),
    ];

    let modals = [
        (config.include_image_modal, IMAGE_MODAL_SLOT, modal_ids::IMAGE_MODAL, render_image_modal as fn(Lang) -> String),
        (config.include_video_modal, VIDEO_MODAL_SLOT, modal_ids::VIDEO_MODAL, render_video_modal),
    ];
    for (enabled, slot, markup_id, render) in modals {
        if !enabled {
            continue;
        }
        // Pages may author the overlay themselves; only a slot overrides that.
        if dom.exists(&Target::id(markup_id)) && !dom.exists(&Target::id(slot)) {
            continue;
        }
        effects.push(place(dom, slot, InsertAt::BodyEnd, render(lang)));
    }
    effects
}

/// "Other products" block, when enabled and the page has a slot for it.
pub fn other_products(dom: &dyn Dom, config: &LayoutConfig, lang: Lang) -> Vec<Effect> {
    let slot = Target::id(OTHER_PRODUCTS_SLOT);
    if !config.inject_other_products || !dom.exists(&slot) {
        return Vec::new();
    }
    vec![Effect::SetHtml {
        target: slot,
        html: render_other_products(config.active_product_key.clone(), lang),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};

    fn with_slots() -> MemoryDom {
        MemoryDom::new()
            .with(MemoryElement::new("div").with_id(HEADER_SLOT))
            .with(MemoryElement::new("div").with_id(FOOTER_SLOT))
    }

    #[test]
    fn header_markup_carries_both_languages() {
        let html = render_header(Lang::Pl);
        assert!(html.contains("data-en=\"Contact\""));
        assert!(html.contains("data-pl=\"Kontakt\""));
        assert!(html.contains("id=\"mobileMenuBtn\""));
        assert!(html.contains("id=\"mobileMenu\""));
        assert!(html.contains("data-lang=\"pl\""));
        assert!(html.contains("#contact"));
        assert_eq!(html.matches("site-nav-link").count(), 8);
    }

    #[test]
    fn slots_receive_markup() {
        let dom = with_slots();
        let effects = inject(&dom, &LayoutConfig::default(), Lang::En);
        assert_eq!(effects.len(), 2);
        assert!(matches!(&effects[0], Effect::SetHtml { target: Target::Id(id), .. } if id == HEADER_SLOT));
        assert!(matches!(&effects[1], Effect::SetHtml { target: Target::Id(id), .. } if id == FOOTER_SLOT));
    }

    #[test]
    fn missing_slots_fall_back_to_body_edges() {
        let dom = MemoryDom::new();
        let config = LayoutConfig {
            include_image_modal: true,
            include_video_modal: true,
            ..LayoutConfig::default()
        };
        let effects = inject(&dom, &config, Lang::En);
        let positions: Vec<InsertAt> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::InsertHtml { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(
            positions,
            [InsertAt::BodyStart, InsertAt::BodyEnd, InsertAt::BodyEnd, InsertAt::BodyEnd]
        );
    }

    #[test]
    fn modal_backdrop_is_the_wrapper_first_child() {
        for (html, id) in [
            (render_image_modal(Lang::En), modal_ids::IMAGE_MODAL),
            (render_video_modal(Lang::Pl), modal_ids::VIDEO_MODAL),
        ] {
            let wrapper = html.find(&format!("id=\"{id}\"")).unwrap();
            let overlay = html.find(&format!("class=\"{}\"", modal_ids::OVERLAY_CLASS)).unwrap();
            assert!(wrapper < overlay, "{id}");
            assert_eq!(html[wrapper..overlay].matches("<div").count(), 1, "{id}");
        }
    }

    #[test]
    fn authored_modal_markup_is_left_alone() {
        let dom = with_slots().with(MemoryElement::new("div").with_id(modal_ids::IMAGE_MODAL));
        let config = LayoutConfig {
            include_image_modal: true,
            ..LayoutConfig::default()
        };
        assert_eq!(inject(&dom, &config, Lang::En).len(), 2);
    }

    #[test]
    fn styles_are_injected_once() {
        let mut dom = MemoryDom::new();
        let first = ensure_global_styles(&dom, true);
        assert_eq!(first.len(), 1);
        dom.apply_all(first);
        assert!(ensure_global_styles(&dom, true).is_empty());
    }

    #[test]
    fn other_products_skip_the_active_one() {
        let html = render_other_products(Some("belt".into()), Lang::Pl);
        assert!(!html.contains("data-product=\"belt\""));
        assert!(html.contains("data-product=\"mk14\""));
        assert!(html.contains("Akcesoria"));
        assert!(html.contains("Pozostałe produkty"));
        assert_eq!(html.matches("data-product=").count(), 4);
    }

    #[test]
    fn other_products_need_a_slot_and_the_flag() {
        let config = LayoutConfig {
            inject_other_products: true,
            ..LayoutConfig::default()
        };
        assert!(other_products(&MemoryDom::new(), &config, Lang::En).is_empty());

        let dom = MemoryDom::new().with(MemoryElement::new("div").with_id(OTHER_PRODUCTS_SLOT));
        assert_eq!(other_products(&dom, &config, Lang::En).len(), 1);

        let disabled = LayoutConfig::default();
        assert!(other_products(&dom, &disabled, Lang::En).is_empty());
    }

    #[test]
    fn banner_markup_is_hidden_with_both_actions() {
        let html = render_cookie_banner(Lang::En);
        assert!(html.contains("id=\"cookieBanner\""));
        assert!(html.contains("id=\"cookieAcceptBtn\""));
        assert!(html.contains("id=\"cookieRejectBtn\""));
        assert!(html.contains("data-pl-href"));
    }
}
