use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::dom::{Dom, Effect, Target};
use crate::core::lang::Lang;
use crate::layout::modal_ids as ids;
use crate::tr;

/// Minimum horizontal travel (px) for a touch swipe to change image.
pub const SWIPE_THRESHOLD_PX: f64 = 45.0;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A click on an `img[data-full]`. `gallery` / `index` come from the
/// image's `data-gallery` / `data-index` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageTrigger {
    pub src: String,
    pub alt: String,
    pub gallery: Option<String>,
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImageModalEvent {
    Open(ImageTrigger),
    Next,
    Prev,
    Close,
    Escape,
    OverlayClick,
    Swipe { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageModal {
    galleries: BTreeMap<String, Vec<GalleryImage>>,
    lang: Lang,
    open: bool,
    gallery: Option<String>,
    index: usize,
}

impl ImageModal {
    /// `None` unless the overlay, its image and its close button exist.
    pub fn bind(dom: &dyn Dom, galleries: BTreeMap<String, Vec<GalleryImage>>, lang: Lang) -> Option<Self> {
        let required = [ids::IMAGE_MODAL, ids::IMAGE, ids::IMAGE_CLOSE];
        if !required.iter().all(|id| dom.exists(&Target::id(*id))) {
            return None;
        }
        Some(Self {
            galleries,
            lang,
            open: false,
            gallery: None,
            index: 0,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    fn images(&self) -> &[GalleryImage] {
        self.gallery
            .as_ref()
            .and_then(|key| self.galleries.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn handle(&mut self, event: ImageModalEvent) -> Vec<Effect> {
        match event {
            ImageModalEvent::Open(trigger) => self.open(trigger),
            ImageModalEvent::Next => self.step(1),
            ImageModalEvent::Prev => self.step(-1),
            ImageModalEvent::Swipe { dx, dy } => {
                if dx.abs() < SWIPE_THRESHOLD_PX || dx.abs() <= dy.abs() {
                    Vec::new()
                } else if dx < 0.0 {
                    self.step(1)
                } else {
                    self.step(-1)
                }
            }
            ImageModalEvent::Close | ImageModalEvent::Escape | ImageModalEvent::OverlayClick => {
                self.close()
            }
        }
    }

    fn open(&mut self, trigger: ImageTrigger) -> Vec<Effect> {
        self.gallery = trigger
            .gallery
            .filter(|key| self.galleries.get(key).is_some_and(|imgs| !imgs.is_empty()));

        let images = self.images();
        let (index, src, alt) = if images.is_empty() {
            (0, trigger.src, trigger.alt)
        } else {
            let index = trigger
                .index
                .filter(|i| *i < images.len())
                .or_else(|| images.iter().position(|img| img.src == trigger.src))
                .unwrap_or(0);
            let image = &images[index];
            (index, image.src.clone(), image.alt.clone().unwrap_or(trigger.alt))
        };
        self.index = index;
        self.open = true;

        let mut effects = self.show_image(src, alt);
        effects.extend(self.controls());
        effects.extend([
            Effect::class(Target::id(ids::IMAGE_MODAL), "modal-hidden", false),
            Effect::attr(Target::id(ids::IMAGE_MODAL), "aria-hidden", "false"),
            Effect::Focus(Target::id(ids::IMAGE_CLOSE)),
            Effect::lock_scroll(true),
        ]);
        effects
    }

    /// Next/previous with wraparound; a no-op without a gallery.
    fn step(&mut self, delta: isize) -> Vec<Effect> {
        let len = self.images().len();
        if !self.open || len < 2 {
            return Vec::new();
        }
        self.index = (self.index as isize + delta).rem_euclid(len as isize) as usize;
        let image = &self.images()[self.index];
        let (src, alt) = (image.src.clone(), image.alt.clone().unwrap_or_default());
        let mut effects = self.show_image(src, alt);
        effects.extend(self.controls());
        effects
    }

    fn close(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        self.gallery = None;
        self.index = 0;
        vec![
            Effect::class(Target::id(ids::IMAGE_MODAL), "modal-hidden", true),
            Effect::attr(Target::id(ids::IMAGE_MODAL), "aria-hidden", "true"),
            Effect::attr(Target::id(ids::IMAGE), "src", ""),
            Effect::attr(Target::id(ids::IMAGE), "alt", ""),
            Effect::lock_scroll(false),
        ]
    }

    fn show_image(&self, src: String, alt: String) -> Vec<Effect> {
        let alt = if alt.trim().is_empty() {
            tr!(self.lang, "modal-image-title")
        } else {
            alt
        };
        vec![
            Effect::attr(Target::id(ids::IMAGE), "src", src),
            Effect::attr(Target::id(ids::IMAGE), "alt", alt),
        ]
    }

    /// Prev/next buttons and the counter are shown only for galleries with
    /// more than one image.
    fn controls(&self) -> Vec<Effect> {
        let len = self.images().len();
        let navigable = len > 1;
        let mut effects: Vec<Effect> = [ids::IMAGE_PREV, ids::IMAGE_NEXT, ids::IMAGE_COUNTER]
            .into_iter()
            .map(|id| Effect::class(Target::id(id), "modal-hidden", !navigable))
            .collect();
        if navigable {
            effects.push(Effect::text(
                Target::id(ids::IMAGE_COUNTER),
                format!("{} / {}", self.index + 1, len),
            ));
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};

    fn dom() -> MemoryDom {
        let mut dom = MemoryDom::new();
        for id in [
            ids::IMAGE_MODAL,
            ids::IMAGE,
            ids::IMAGE_CLOSE,
            ids::IMAGE_PREV,
            ids::IMAGE_NEXT,
            ids::IMAGE_COUNTER,
        ] {
            dom.push(MemoryElement::new("div").with_id(id));
        }
        dom
    }

    fn gallery(n: usize) -> BTreeMap<String, Vec<GalleryImage>> {
        let images = (0..n)
            .map(|i| GalleryImage {
                src: format!("img-{i}.jpg"),
                alt: Some(format!("Rig {i}")),
            })
            .collect();
        BTreeMap::from([("rig".to_string(), images)])
    }

    fn open_in_gallery(index: usize) -> ImageModalEvent {
        ImageModalEvent::Open(ImageTrigger {
            src: format!("img-{index}.jpg"),
            alt: String::new(),
            gallery: Some("rig".into()),
            index: Some(index),
        })
    }

    fn shown_src(dom: &MemoryDom) -> Option<&str> {
        dom.element(ids::IMAGE).and_then(|el| el.attr("src"))
    }

    #[test]
    fn next_wraps_around_the_gallery() {
        let mut dom = dom();
        let mut modal = ImageModal::bind(&dom, gallery(4), Lang::En).unwrap();
        dom.apply_all(modal.handle(open_in_gallery(0)));
        for _ in 0..4 {
            dom.apply_all(modal.handle(ImageModalEvent::Next));
        }
        assert_eq!(modal.index(), 0);
        assert_eq!(shown_src(&dom), Some("img-0.jpg"));
        assert_eq!(dom.element(ids::IMAGE_COUNTER).unwrap().text, "1 / 4");
    }

    #[test]
    fn prev_from_first_goes_to_last() {
        let mut dom = dom();
        let mut modal = ImageModal::bind(&dom, gallery(4), Lang::En).unwrap();
        dom.apply_all(modal.handle(open_in_gallery(0)));
        dom.apply_all(modal.handle(ImageModalEvent::Prev));
        assert_eq!(modal.index(), 3);
        assert_eq!(shown_src(&dom), Some("img-3.jpg"));
        assert_eq!(dom.element(ids::IMAGE).unwrap().attr("alt"), Some("Rig 3"));
    }

    #[test]
    fn open_shows_overlay_and_locks_scroll() {
        let mut dom = dom();
        let mut modal = ImageModal::bind(&dom, gallery(2), Lang::En).unwrap();
        dom.apply_all(modal.handle(open_in_gallery(1)));

        let overlay = dom.element(ids::IMAGE_MODAL).unwrap();
        assert!(!overlay.has_class("modal-hidden"));
        assert_eq!(overlay.attr("aria-hidden"), Some("false"));
        assert!(dom.element(ids::IMAGE_CLOSE).unwrap().focused);
        assert_eq!(dom.body().style.get("overflow").map(String::as_str), Some("hidden"));
        assert!(!dom.element(ids::IMAGE_NEXT).unwrap().has_class("modal-hidden"));
    }

    #[test]
    fn single_image_has_no_navigation() {
        let mut dom = dom();
        let mut modal = ImageModal::bind(&dom, BTreeMap::new(), Lang::Pl).unwrap();
        dom.apply_all(modal.handle(ImageModalEvent::Open(ImageTrigger {
            src: "full.jpg".into(),
            ..ImageTrigger::default()
        })));
        assert!(dom.element(ids::IMAGE_NEXT).unwrap().has_class("modal-hidden"));
        assert!(dom.element(ids::IMAGE_COUNTER).unwrap().has_class("modal-hidden"));
        assert_eq!(dom.element(ids::IMAGE).unwrap().attr("alt"), Some("Podgląd zdjęcia"));
        assert!(modal.handle(ImageModalEvent::Next).is_empty());
        assert!(modal.handle(ImageModalEvent::Swipe { dx: -80.0, dy: 0.0 }).is_empty());
    }

    #[test]
    fn swipe_needs_threshold_and_horizontal_travel() {
        let mut modal = ImageModal::bind(&dom(), gallery(3), Lang::En).unwrap();
        modal.handle(open_in_gallery(0));

        assert!(modal.handle(ImageModalEvent::Swipe { dx: -30.0, dy: 0.0 }).is_empty());
        assert!(modal.handle(ImageModalEvent::Swipe { dx: -60.0, dy: 90.0 }).is_empty());
        modal.handle(ImageModalEvent::Swipe { dx: -60.0, dy: 10.0 });
        assert_eq!(modal.index(), 1);
        modal.handle(ImageModalEvent::Swipe { dx: 50.0, dy: 0.0 });
        assert_eq!(modal.index(), 0);
    }

    #[test]
    fn every_close_path_clears_the_image() {
        for close in [ImageModalEvent::Close, ImageModalEvent::Escape, ImageModalEvent::OverlayClick] {
            let mut dom = dom();
            let mut modal = ImageModal::bind(&dom, gallery(2), Lang::En).unwrap();
            dom.apply_all(modal.handle(open_in_gallery(0)));
            dom.apply_all(modal.handle(close.clone()));

            assert!(!modal.is_open());
            assert!(dom.element(ids::IMAGE_MODAL).unwrap().has_class("modal-hidden"));
            assert_eq!(shown_src(&dom), Some(""));
            assert!(dom.body().style.get("overflow").is_none(), "{close:?}");
        }
    }

    #[test]
    fn escape_while_closed_does_nothing() {
        let mut modal = ImageModal::bind(&dom(), gallery(2), Lang::En).unwrap();
        assert!(modal.handle(ImageModalEvent::Escape).is_empty());
    }

    #[test]
    fn unknown_gallery_falls_back_to_clicked_image() {
        let mut dom = dom();
        let mut modal = ImageModal::bind(&dom, gallery(3), Lang::En).unwrap();
        dom.apply_all(modal.handle(ImageModalEvent::Open(ImageTrigger {
            src: "loose.jpg".into(),
            alt: "Loose".into(),
            gallery: Some("missing".into()),
            index: Some(2),
        })));
        assert_eq!(shown_src(&dom), Some("loose.jpg"));
        assert_eq!(modal.index(), 0);
    }

    #[test]
    fn missing_markup_disables_the_modal() {
        assert!(ImageModal::bind(&MemoryDom::new(), BTreeMap::new(), Lang::En).is_none());
    }
}
