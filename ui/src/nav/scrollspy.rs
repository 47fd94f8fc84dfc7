//! Highlights the nav link of the page section currently most in view.
//!
//! The adapter feeds either IntersectionObserver samples
//! ([`Scrollspy::on_intersections`]) or, where that API is missing, section
//! offsets sampled at most once per animation frame ([`Scrollspy::on_scroll`]).

use std::collections::HashMap;

use crate::core::dom::{Dom, Effect, Selector, Target};
use crate::core::location::Location;
use crate::layout::NAV_SECTIONS;

/// Observer margin biased towards the upper third of the viewport.
pub const ROOT_MARGIN: &str = "-30% 0px -55% 0px";
pub const THRESHOLDS: [f64; 7] = [0.05, 0.1, 0.2, 0.35, 0.5, 0.65, 0.8];
/// Fallback mode: distance (px) below the viewport top a section's top edge
/// is compared against.
pub const FALLBACK_OFFSET_PX: f64 = 120.0;

const LINK_CLASS: &str = "site-nav-link";
const ACTIVE_CLASS: &str = "nav-active";

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSample {
    pub id: String,
    pub intersecting: bool,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scrollspy {
    /// Tracked sections present on the page, in document order.
    sections: Vec<&'static str>,
    /// Section id each `.site-nav-link` points at; `None` for links without
    /// a fragment, which the spy never touches.
    links: Vec<Option<String>>,
    ratios: HashMap<&'static str, f64>,
    active: Option<String>,
}

fn link_section(href: &str, location: &Location) -> Option<String> {
    if !href.contains('#') {
        return None;
    }
    match location.resolve(href) {
        Some(url) => url.fragment().map(str::to_string),
        None => href.split_once('#').map(|(_, f)| f.to_string()),
    }
}

fn is_tracked(id: &str) -> bool {
    NAV_SECTIONS.iter().any(|section| *section == id)
}

impl Scrollspy {
    /// Needs at least two tracked sections and one fragment nav link.
    /// Returns the spy plus the effects for the initial highlight: the
    /// section named by the current hash, else the hero.
    pub fn bind(dom: &dyn Dom, location: &Location) -> Option<(Self, Vec<Effect>)> {
        let sections: Vec<&'static str> = NAV_SECTIONS
            .into_iter()
            .filter(|id| dom.exists(&Target::id(*id)))
            .collect();
        if sections.len() < 2 {
            return None;
        }

        let links: Vec<Option<String>> = dom
            .attrs_of(&Selector::Class(LINK_CLASS), "href")
            .into_iter()
            .map(|href| href.and_then(|h| link_section(&h, location)))
            .collect();
        if links.iter().all(Option::is_none) {
            return None;
        }

        let mut spy = Self {
            sections,
            links,
            ratios: HashMap::new(),
            active: None,
        };
        let hash = location.hash();
        let initial = if is_tracked(hash) { hash } else { "hero" };
        let effects = spy.set_active(initial);
        Some((spy, effects))
    }

    pub fn sections(&self) -> &[&'static str] {
        &self.sections
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Merge observer samples into the per-section ratios and activate the
    /// most visible intersecting section. Equal ratios resolve to the
    /// earlier section. With nothing intersecting the highlight stays put.
    pub fn on_intersections(&mut self, samples: &[SectionSample]) -> Vec<Effect> {
        for sample in samples {
            if let Some(id) = self.sections.iter().find(|id| **id == sample.id) {
                let ratio = if sample.intersecting { sample.ratio } else { 0.0 };
                self.ratios.insert(*id, ratio);
            }
        }

        let mut best: Option<(&'static str, f64)> = None;
        for id in &self.sections {
            let ratio = self.ratios.get(id).copied().unwrap_or(0.0);
            if ratio > 0.0 && best.map_or(true, |(_, r)| ratio > r) {
                best = Some((*id, ratio));
            }
        }
        match best {
            Some((id, _)) => self.set_active(id),
            None => Vec::new(),
        }
    }

    /// Fallback: `tops` are section top edges relative to the viewport top.
    /// The section whose top is closest to [`FALLBACK_OFFSET_PX`] wins.
    pub fn on_scroll(&mut self, tops: &[(String, f64)]) -> Vec<Effect> {
        let mut best: Option<(&'static str, f64)> = None;
        for id in &self.sections {
            let Some((_, top)) = tops.iter().find(|(sid, _)| sid == id) else {
                continue;
            };
            let distance = (top - FALLBACK_OFFSET_PX).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((*id, distance));
            }
        }
        match best {
            Some((id, _)) => self.set_active(id),
            None => Vec::new(),
        }
    }

    pub fn on_hash_change(&mut self, hash: &str) -> Vec<Effect> {
        let id = hash.trim_start_matches('#');
        if is_tracked(id) {
            self.set_active(id)
        } else {
            Vec::new()
        }
    }

    fn set_active(&mut self, id: &str) -> Vec<Effect> {
        if self.active.as_deref() == Some(id) {
            return Vec::new();
        }
        self.active = Some(id.to_string());

        let mut effects = Vec::new();
        for (i, section) in self.links.iter().enumerate() {
            let Some(section) = section else { continue };
            let target = Target::Nth(Selector::Class(LINK_CLASS), i);
            let on = section == id;
            effects.push(Effect::class(target.clone(), ACTIVE_CLASS, on));
            effects.push(if on {
                Effect::attr(target, "aria-current", "page")
            } else {
                Effect::remove_attr(target, "aria-current")
            });
        }
        effects
    }
}

/// At most one pending callback per animation frame.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// `true` when the caller should schedule a frame callback now.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Call from the frame callback before sampling.
    pub fn fire(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};

    fn page() -> MemoryDom {
        let mut dom = MemoryDom::new();
        for id in NAV_SECTIONS {
            dom.push(MemoryElement::new("section").with_id(id));
        }
        for id in NAV_SECTIONS {
            dom.push(
                MemoryElement::new("a")
                    .with_class(LINK_CLASS)
                    .with_attr("href", &format!("/en/#{id}")),
            );
        }
        dom.push(MemoryElement::new("a").with_class(LINK_CLASS).with_attr("href", "/products-6dof.html"));
        dom
    }

    fn location(hash: &str) -> Location {
        Location::parse(&format!("https://fms.example/en/{hash}")).unwrap()
    }

    fn active_links(dom: &MemoryDom) -> Vec<String> {
        (0..dom.count(&Selector::Class(LINK_CLASS)))
            .filter_map(|i| dom.nth(&Selector::Class(LINK_CLASS), i))
            .filter(|el| el.has_class(ACTIVE_CLASS))
            .filter_map(|el| el.attr("href").map(str::to_string))
            .collect()
    }

    fn sample(id: &str, ratio: f64) -> SectionSample {
        SectionSample {
            id: id.into(),
            intersecting: ratio > 0.0,
            ratio,
        }
    }

    #[test]
    fn initial_highlight_follows_hash_or_hero() {
        let mut dom = page();
        let (spy, effects) = Scrollspy::bind(&dom, &location("#about")).unwrap();
        dom.apply_all(effects);
        assert_eq!(spy.active(), Some("about"));
        assert_eq!(active_links(&dom), ["/en/#about"]);

        let (spy, _) = Scrollspy::bind(&page(), &location("#pricing")).unwrap();
        assert_eq!(spy.active(), Some("hero"));
    }

    #[test]
    fn most_visible_section_is_the_only_active_link() {
        let mut dom = page();
        let (mut spy, effects) = Scrollspy::bind(&dom, &location("")).unwrap();
        dom.apply_all(effects);

        let effects = spy.on_intersections(&[
            sample("hero", 0.1),
            sample("products", 0.65),
            sample("about", 0.2),
            sample("contact", 0.0),
        ]);
        dom.apply_all(effects);
        assert_eq!(spy.active(), Some("products"));
        assert_eq!(active_links(&dom), ["/en/#products"]);
        let current: Vec<_> = (0..4)
            .map(|i| dom.nth(&Selector::Class(LINK_CLASS), i).unwrap().attr("aria-current"))
            .collect();
        assert_eq!(current, [None, Some("page"), None, None]);
    }

    #[test]
    fn ratios_accumulate_across_batches_and_ties_prefer_document_order() {
        let (mut spy, _) = Scrollspy::bind(&page(), &location("")).unwrap();
        spy.on_intersections(&[sample("about", 0.35)]);
        assert_eq!(spy.active(), Some("about"));

        // Only `products` changed; `about` keeps its earlier ratio.
        spy.on_intersections(&[sample("products", 0.35)]);
        assert_eq!(spy.active(), Some("products"));

        spy.on_intersections(&[sample("products", 0.0), sample("about", 0.0)]);
        assert_eq!(spy.active(), Some("products"));
    }

    #[test]
    fn scroll_fallback_picks_the_section_nearest_the_offset() {
        let (mut spy, _) = Scrollspy::bind(&page(), &location("")).unwrap();
        let tops = vec![
            ("hero".to_string(), -900.0),
            ("products".to_string(), -200.0),
            ("about".to_string(), 90.0),
            ("contact".to_string(), 700.0),
        ];
        spy.on_scroll(&tops);
        assert_eq!(spy.active(), Some("about"));
    }

    #[test]
    fn hash_changes_only_track_known_sections() {
        let (mut spy, _) = Scrollspy::bind(&page(), &location("")).unwrap();
        assert!(!spy.on_hash_change("#contact").is_empty());
        assert_eq!(spy.active(), Some("contact"));
        assert!(spy.on_hash_change("#gallery").is_empty());
        assert_eq!(spy.active(), Some("contact"));
    }

    #[test]
    fn needs_two_sections_and_a_fragment_link() {
        let dom = MemoryDom::new()
            .with(MemoryElement::new("section").with_id("hero"))
            .with(MemoryElement::new("a").with_class(LINK_CLASS).with_attr("href", "#hero"));
        assert!(Scrollspy::bind(&dom, &location("")).is_none());

        let dom = MemoryDom::new()
            .with(MemoryElement::new("section").with_id("hero"))
            .with(MemoryElement::new("section").with_id("about"))
            .with(MemoryElement::new("a").with_class(LINK_CLASS).with_attr("href", "/plans.html"));
        assert!(Scrollspy::bind(&dom, &location("")).is_none());
    }

    #[test]
    fn frame_throttle_coalesces_requests() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.request());
        assert!(!throttle.request());
        throttle.fire();
        assert!(throttle.request());
    }
}
