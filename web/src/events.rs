//! Browser listeners feeding [`PageEvent`]s into the shared page state.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `Closure::forget`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ui::layout::modal_ids as ids;
use ui::modal::{ImageModalEvent, ImageTrigger, VideoModalEvent};
use ui::nav::menu::{BUTTON_ID, MENU_ID};
use ui::nav::scrollspy::{ROOT_MARGIN, THRESHOLDS};
use ui::nav::{AnchorClick, FrameThrottle, SectionSample};
use ui::videos::hydrate::{DEMO_INDEX_ATTR, VIDEO_KEY_ATTR};
use ui::{PageEvent, SiteLayout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent, TouchEvent,
};

use crate::dom::WebDom;

pub struct Page {
    pub dom: WebDom,
    pub site: SiteLayout,
}

pub type SharedPage = Rc<RefCell<Page>>;

/// Route one event; `true` when the default action should be prevented.
pub fn dispatch(page: &SharedPage, event: PageEvent) -> bool {
    let Ok(mut page) = page.try_borrow_mut() else {
        tracing::debug!(?event, "page busy; event dropped");
        return false;
    };
    let Page { dom, site } = &mut *page;
    site.handle(dom, event)
}

pub fn listen<E, F>(target: &EventTarget, name: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    if let Err(err) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        tracing::warn!(?err, name, "could not attach listener");
    }
    closure.forget();
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

/// The modal owning a backdrop click. Clicks inside the panel bubble up
/// with a different target and do not count.
fn backdrop_event(target: &Element) -> Option<PageEvent> {
    if !target.class_list().contains(ids::OVERLAY_CLASS) {
        return None;
    }
    let modal = closest(target, &format!("#{}, #{}", ids::IMAGE_MODAL, ids::VIDEO_MODAL))?;
    PageEvent::backdrop(&modal.id())
}

/// Translate a click into a page event, most specific control first.
fn click_event(target: &Element, mouse: &MouseEvent) -> Vec<PageEvent> {
    let mut events = Vec::new();

    if closest(target, &format!("#{BUTTON_ID}")).is_some() {
        events.push(PageEvent::MenuToggle);
        return events;
    }
    if let Some(button) = closest(target, "[data-lang]") {
        if let Some(code) = button.get_attribute("data-lang") {
            events.push(PageEvent::LangButton(code));
        }
        return events;
    }
    if let Some(img) = closest(target, "img[data-full]") {
        let src = img.get_attribute("data-full").or_else(|| img.get_attribute("src")).unwrap_or_default();
        events.push(PageEvent::Image(ImageModalEvent::Open(ImageTrigger {
            src,
            alt: img.get_attribute("alt").unwrap_or_default(),
            gallery: img.get_attribute("data-gallery").filter(|g| !g.is_empty()),
            index: img.get_attribute("data-index").and_then(|i| i.trim().parse().ok()),
        })));
        return events;
    }

    let image_controls = [
        (ids::IMAGE_CLOSE, ImageModalEvent::Close),
        (ids::IMAGE_NEXT, ImageModalEvent::Next),
        (ids::IMAGE_PREV, ImageModalEvent::Prev),
    ];
    for (id, event) in image_controls {
        if closest(target, &format!("#{id}")).is_some() {
            events.push(PageEvent::Image(event));
            return events;
        }
    }
    if let Some(event) = backdrop_event(target) {
        events.push(event);
        return events;
    }
    if closest(target, &format!("#{}", ids::VIDEO_CLOSE)).is_some() {
        events.push(PageEvent::Video(VideoModalEvent::Close));
        return events;
    }
    if let Some(button) = closest(target, &format!("[{VIDEO_KEY_ATTR}]")) {
        if let Some(key) = button.get_attribute(VIDEO_KEY_ATTR) {
            events.push(PageEvent::DemoButton(key));
        }
        return events;
    }
    if let Some(card) = closest(target, &format!("[{DEMO_INDEX_ATTR}]")) {
        if let Some(index) = card.get_attribute(DEMO_INDEX_ATTR).and_then(|i| i.parse().ok()) {
            events.push(PageEvent::DemoCard(index));
        }
        return events;
    }

    if let Some(link) = closest(target, "a") {
        if closest(&link, &format!("#{MENU_ID}")).is_some() {
            events.push(PageEvent::MenuLinkClick);
        }
        if let Some(href) = link.get_attribute("href").filter(|h| h.contains('#')) {
            events.push(PageEvent::Anchor(AnchorClick {
                href,
                button: mouse.button(),
                modifiers: mouse.meta_key() || mouse.ctrl_key() || mouse.shift_key() || mouse.alt_key(),
                default_prevented: mouse.default_prevented(),
            }));
        }
    }
    events
}

fn bind_clicks(page: &SharedPage, document: &EventTarget) {
    let page = page.clone();
    listen(document, "click", move |mouse: MouseEvent| {
        let Some(target) = mouse.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let mut prevent = false;
        for event in click_event(&target, &mouse) {
            prevent |= dispatch(&page, event);
        }
        if prevent {
            mouse.prevent_default();
        }
    });
}

fn bind_keys(page: &SharedPage, document: &EventTarget) {
    let page = page.clone();
    listen(document, "keydown", move |key: KeyboardEvent| {
        let image_open = page
            .try_borrow()
            .is_ok_and(|p| p.site.image_modal().is_some_and(|m| m.is_open()));
        let event = match key.key().as_str() {
            "Escape" => PageEvent::Escape,
            "ArrowRight" if image_open => PageEvent::Image(ImageModalEvent::Next),
            "ArrowLeft" if image_open => PageEvent::Image(ImageModalEvent::Prev),
            _ => return,
        };
        dispatch(&page, event);
    });
}

fn bind_window(page: &SharedPage, window: &web_sys::Window) {
    let resize_page = page.clone();
    let win = window.clone();
    listen(window, "resize", move |_: Event| {
        if let Some(width) = win.inner_width().ok().and_then(|w| w.as_f64()) {
            dispatch(&resize_page, PageEvent::Resize { width });
        }
    });

    let hash_page = page.clone();
    let win = window.clone();
    listen(window, "hashchange", move |_: Event| {
        let hash = win.location().hash().unwrap_or_default();
        dispatch(&hash_page, PageEvent::HashChange(hash.trim_start_matches('#').to_string()));
    });
}

fn touch_point(event: &TouchEvent) -> Option<(f64, f64)> {
    let touch = event.changed_touches().get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn bind_swipe(page: &SharedPage, document: &web_sys::Document) {
    let Some(overlay) = document.get_element_by_id(ids::IMAGE_MODAL) else {
        return;
    };
    let start: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));

    let begin = start.clone();
    listen(&overlay, "touchstart", move |touch: TouchEvent| begin.set(touch_point(&touch)));

    let page = page.clone();
    listen(&overlay, "touchend", move |touch: TouchEvent| {
        let (Some((x0, y0)), Some((x1, y1))) = (start.take(), touch_point(&touch)) else {
            return;
        };
        dispatch(&page, PageEvent::Image(ImageModalEvent::Swipe { dx: x1 - x0, dy: y1 - y0 }));
    });
}

fn observe_sections(page: &SharedPage, sections: &[&'static str], document: &web_sys::Document) -> Result<(), JsValue> {
    let callback_page = page.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let samples: Vec<SectionSample> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| SectionSample {
                    id: entry.target().id(),
                    intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
                .collect();
            dispatch(&callback_page, PageEvent::Intersections(samples));
        },
    );

    let thresholds = js_sys::Array::new();
    for t in THRESHOLDS {
        thresholds.push(&JsValue::from_f64(t));
    }
    let init = IntersectionObserverInit::new();
    init.set_root_margin(ROOT_MARGIN);
    init.set_threshold(&thresholds);

    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for id in sections {
        if let Some(section) = document.get_element_by_id(id) {
            observer.observe(&section);
        }
    }
    callback.forget();
    Ok(())
}

/// rAF-throttled scroll sampling for browsers without IntersectionObserver.
fn sample_on_scroll(page: &SharedPage, sections: Vec<&'static str>, window: &web_sys::Window) {
    let throttle = Rc::new(RefCell::new(FrameThrottle::default()));
    let page = page.clone();
    let win = window.clone();
    listen(window, "scroll", move |_: Event| {
        if !throttle.borrow_mut().request() {
            return;
        }
        let throttle = throttle.clone();
        let page = page.clone();
        let sections = sections.clone();
        let frame = Closure::once_into_js(move || {
            throttle.borrow_mut().fire();
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let tops: Vec<(String, f64)> = sections
                .iter()
                .filter_map(|id| {
                    let el = document.get_element_by_id(id)?;
                    Some((id.to_string(), el.get_bounding_client_rect().top()))
                })
                .collect();
            dispatch(&page, PageEvent::Scroll(tops));
        });
        if let Err(err) = win.request_animation_frame(frame.unchecked_ref()) {
            tracing::debug!(?err, "animation frame unavailable");
        }
    });
}

fn bind_scrollspy(page: &SharedPage, window: &web_sys::Window, document: &web_sys::Document) {
    let sections: Vec<&'static str> = match page.try_borrow() {
        Ok(p) => match p.site.scrollspy() {
            Some(spy) => spy.sections().to_vec(),
            None => return,
        },
        Err(_) => return,
    };
    if let Err(err) = observe_sections(page, &sections, document) {
        tracing::debug!(?err, "IntersectionObserver unavailable; sampling on scroll");
        sample_on_scroll(page, sections, window);
    }
}

/// Attach every page-level listener.
pub fn bind(page: &SharedPage) {
    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    bind_clicks(page, &document);
    bind_keys(page, &document);
    bind_window(page, &window);
    bind_swipe(page, &document);
    bind_scrollspy(page, &window, &document);
}

