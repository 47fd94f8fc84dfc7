//! The page-load cascade and the event router that ties the features
//! together.
//!
//! [`SiteLayout::init`] runs once per page: styles, shared markup, mobile
//! menu, language, modals, "other products", scrollspy. Afterwards the
//! adapter forwards browser events through [`SiteLayout::handle`] and
//! hydrates the video demos once the manifest arrives.

use crate::config::ManifestConfig;
use crate::context::AppContext;
use crate::core::dom::{Dom, Effect};
use crate::core::fetch::HttpClient;
use crate::core::lang::{self, Lang};
use crate::core::location::Location;
use crate::layout;
use crate::layout::modal_ids;
use crate::localize;
use crate::modal::{ImageModal, ImageModalEvent, VideoClip, VideoModal, VideoModalEvent};
use crate::nav::{self, AnchorClick, LangSwitch, MenuEvent, MobileMenu, Scrollspy, SectionSample};
use crate::videos::{self, VideoCatalog};

/// Browser events the adapter forwards, already reduced to plain data.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    MenuToggle,
    /// A link inside the mobile menu.
    MenuLinkClick,
    Escape,
    Resize { width: f64 },
    Anchor(AnchorClick),
    /// A `[data-lang]` button, with its attribute value.
    LangButton(String),
    Image(ImageModalEvent),
    Video(VideoModalEvent),
    /// A `[data-video-key]` button.
    DemoButton(String),
    /// A "more demos" card, by its `data-demo-index`.
    DemoCard(usize),
    Intersections(Vec<SectionSample>),
    /// Fallback scrollspy input: section tops relative to the viewport.
    Scroll(Vec<(String, f64)>),
    HashChange(String),
}

impl PageEvent {
    /// A click that landed on a modal's backdrop, by the modal's id.
    pub fn backdrop(modal_id: &str) -> Option<Self> {
        match modal_id {
            modal_ids::IMAGE_MODAL => Some(PageEvent::Image(ImageModalEvent::OverlayClick)),
            modal_ids::VIDEO_MODAL => Some(PageEvent::Video(VideoModalEvent::OverlayClick)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct SiteLayout {
    ctx: AppContext,
    menu: Option<MobileMenu>,
    image_modal: Option<ImageModal>,
    video_modal: Option<VideoModal>,
    scrollspy: Option<Scrollspy>,
    /// `None` until the manifest request settles.
    catalog: Option<VideoCatalog>,
}

impl SiteLayout {
    /// Applies each step before the next so later steps see injected markup.
    pub fn init(dom: &mut dyn Dom, ctx: AppContext) -> Self {
        let config = ctx.layout();
        let lang = ctx.lang;

        let effects = layout::ensure_global_styles(dom, config.any_modal());
        dom.apply_all(effects);
        let effects = layout::inject(dom, &config, lang);
        dom.apply_all(effects);

        let menu = MobileMenu::bind(dom);

        let effects = localize::set_language(dom, ctx.store.as_ref(), lang, &ctx.options.meta_data, &ctx.location);
        dom.apply_all(effects);

        let image_modal = if config.include_image_modal {
            ImageModal::bind(dom, ctx.options.galleries.clone(), lang)
        } else {
            None
        };
        let video_modal = if config.include_video_modal {
            VideoModal::bind(dom, lang)
        } else {
            None
        };

        let effects = layout::other_products(dom, &config, lang);
        if !effects.is_empty() {
            dom.apply_all(effects);
            let effects = localize::apply_texts(dom, lang);
            dom.apply_all(effects);
        }

        let scrollspy = match Scrollspy::bind(dom, &ctx.location) {
            Some((spy, effects)) => {
                dom.apply_all(effects);
                Some(spy)
            }
            None => None,
        };

        tracing::debug!(
            lang = lang.code(),
            menu = menu.is_some(),
            image_modal = image_modal.is_some(),
            video_modal = video_modal.is_some(),
            scrollspy = scrollspy.is_some(),
            "site layout initialized"
        );

        Self {
            ctx,
            menu,
            image_modal,
            video_modal,
            scrollspy,
            catalog: None,
        }
    }

    pub fn lang(&self) -> Lang {
        self.ctx.lang
    }

    pub fn location(&self) -> &Location {
        &self.ctx.location
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn menu(&self) -> Option<&MobileMenu> {
        self.menu.as_ref()
    }

    pub fn image_modal(&self) -> Option<&ImageModal> {
        self.image_modal.as_ref()
    }

    pub fn video_modal(&self) -> Option<&VideoModal> {
        self.video_modal.as_ref()
    }

    pub fn scrollspy(&self) -> Option<&Scrollspy> {
        self.scrollspy.as_ref()
    }

    /// Where to fetch the video manifest from; `None` when disabled.
    pub fn manifest_config(&self) -> Option<&ManifestConfig> {
        self.ctx.options.video_manifest.as_ref()
    }

    /// Bind a (possibly empty) catalog to the page.
    pub fn apply_catalog(&mut self, dom: &mut dyn Dom, catalog: VideoCatalog) {
        let effects = videos::hydrate(dom, &catalog, self.ctx.lang);
        dom.apply_all(effects);
        self.catalog = Some(catalog);
    }

    /// Fetch the manifest and hydrate. Failures degrade to an empty catalog.
    pub async fn hydrate_videos<C: HttpClient>(&mut self, dom: &mut dyn Dom, client: &C) {
        let Some(config) = self.ctx.options.video_manifest.clone() else {
            return;
        };
        let catalog = videos::load_catalog(client, &config, &self.ctx.location).await;
        self.apply_catalog(dom, catalog);
    }

    /// Route one event. Returns whether the adapter should prevent the
    /// browser's default action.
    pub fn handle(&mut self, dom: &mut dyn Dom, event: PageEvent) -> bool {
        let (effects, prevent) = match event {
            PageEvent::MenuToggle => (self.menu_event(MenuEvent::Toggle), false),
            PageEvent::MenuLinkClick => (self.menu_event(MenuEvent::LinkClicked), false),
            PageEvent::Resize { width } => (self.menu_event(MenuEvent::Resized { width }), false),
            PageEvent::Escape => (self.escape(), false),
            PageEvent::Anchor(click) => match nav::anchor_target(&click, &self.ctx.location, dom) {
                Some(id) => {
                    // pushState fires no hashchange.
                    self.ctx.location = self.ctx.location.with_hash(&id);
                    let mut effects = self.menu_event(MenuEvent::LinkClicked);
                    effects.extend(nav::scroll_to(&id));
                    (effects, true)
                }
                None => (Vec::new(), false),
            },
            PageEvent::LangButton(code) => match nav::lang_switch(&code, &self.ctx.location) {
                Some(switch) => (self.switch_language(dom, switch), true),
                None => (Vec::new(), false),
            },
            PageEvent::Image(event) => match self.image_modal.as_mut() {
                Some(modal) => (modal.handle(event), false),
                None => (Vec::new(), false),
            },
            PageEvent::Video(event) => (self.video_event(event), false),
            PageEvent::DemoButton(key) => {
                let clip = self.catalog.as_ref().and_then(|c| videos::demo_clip(c, key.trim(), self.ctx.lang));
                self.open_clip(clip)
            }
            PageEvent::DemoCard(index) => {
                let clip = self.catalog.as_ref().and_then(|c| videos::extra_clip(c, index, self.ctx.lang));
                self.open_clip(clip)
            }
            PageEvent::Intersections(samples) => match self.scrollspy.as_mut() {
                Some(spy) => (spy.on_intersections(&samples), false),
                None => (Vec::new(), false),
            },
            PageEvent::Scroll(tops) => match self.scrollspy.as_mut() {
                Some(spy) => (spy.on_scroll(&tops), false),
                None => (Vec::new(), false),
            },
            PageEvent::HashChange(hash) => {
                self.ctx.location = self.ctx.location.with_hash(&hash);
                match self.scrollspy.as_mut() {
                    Some(spy) => (spy.on_hash_change(&hash), false),
                    None => (Vec::new(), false),
                }
            }
        };
        dom.apply_all(effects);
        prevent
    }

    fn menu_event(&mut self, event: MenuEvent) -> Vec<Effect> {
        self.menu.as_mut().map(|menu| menu.handle(event)).unwrap_or_default()
    }

    fn video_event(&mut self, event: VideoModalEvent) -> Vec<Effect> {
        self.video_modal.as_mut().map(|modal| modal.handle(event)).unwrap_or_default()
    }

    /// Escape closes whatever is open.
    fn escape(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(modal) = self.image_modal.as_mut().filter(|m| m.is_open()) {
            effects.extend(modal.handle(ImageModalEvent::Escape));
        }
        if let Some(modal) = self.video_modal.as_mut().filter(|m| m.is_open()) {
            effects.extend(modal.handle(VideoModalEvent::Escape));
        }
        effects.extend(self.menu_event(MenuEvent::Escape));
        effects
    }

    fn open_clip(&mut self, clip: Option<VideoClip>) -> (Vec<Effect>, bool) {
        match (clip, self.video_modal.as_mut()) {
            (Some(clip), Some(modal)) => (modal.handle(VideoModalEvent::Open(clip)), true),
            _ => (Vec::new(), false),
        }
    }

    fn switch_language(&mut self, dom: &dyn Dom, switch: LangSwitch) -> Vec<Effect> {
        match switch {
            LangSwitch::Navigate { lang, url } => {
                lang::remember(lang, self.ctx.store.as_ref());
                vec![Effect::Navigate(url)]
            }
            LangSwitch::InPlace(lang) => {
                self.ctx.lang = lang;
                if let Some(modal) = self.image_modal.as_mut() {
                    modal.set_lang(lang);
                }
                if let Some(modal) = self.video_modal.as_mut() {
                    modal.set_lang(lang);
                }
                let mut effects = localize::set_language(
                    dom,
                    self.ctx.store.as_ref(),
                    lang,
                    &self.ctx.options.meta_data,
                    &self.ctx.location,
                );
                if let Some(catalog) = &self.catalog {
                    effects.extend(videos::relabel(dom, catalog, lang));
                }
                effects.extend(self.menu_event(MenuEvent::LinkClicked));
                effects
            }
        }
    }
}
