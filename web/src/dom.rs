//! [`Dom`] over the live document.

use ui::core::dom::{Dom, Effect, InsertAt, Selector, Target, VideoAction};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlMediaElement, HtmlSelectElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

pub struct WebDom {
    document: Document,
}

fn query_all(document: &Document, selector: &Selector) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(&selector.to_css()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn report(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        tracing::debug!(?err, what, "DOM effect failed");
    }
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn resolve(&self, target: &Target) -> Vec<Element> {
        match target {
            Target::Id(id) => self.document.get_element_by_id(id).into_iter().collect(),
            Target::All(selector) => query_all(&self.document, selector),
            Target::Nth(selector, n) => query_all(&self.document, selector).into_iter().nth(*n).into_iter().collect(),
            Target::Root => self.document.document_element().into_iter().collect(),
            Target::Body => self.document.body().map(Element::from).into_iter().collect(),
        }
    }

    fn each(&self, target: &Target, mut f: impl FnMut(&Element)) {
        for element in self.resolve(target) {
            f(&element);
        }
    }

    fn head_append(&self, element: &Element) {
        match self.document.head() {
            Some(head) => report(head.append_child(element).map(drop), "append to head"),
            None => tracing::debug!("document has no <head>"),
        }
    }

    fn upsert_meta(&self, attr: &str, key: &str, content: &str) {
        let selector = Selector::AttrValue(if attr == "name" { "name" } else { "property" }, key.to_string());
        let existing = self.document.query_selector(&format!("meta{}", selector.to_css())).ok().flatten();
        let meta = match existing {
            Some(meta) => meta,
            None => {
                let Ok(meta) = self.document.create_element("meta") else { return };
                report(meta.set_attribute(attr, key), "meta key");
                self.head_append(&meta);
                meta
            }
        };
        report(meta.set_attribute("content", content), "meta content");
    }

    fn set_canonical(&self, href: &str) {
        let existing = self.document.query_selector("link[rel=\"canonical\"]").ok().flatten();
        let link = match existing {
            Some(link) => link,
            None => {
                let Ok(link) = self.document.create_element("link") else { return };
                report(link.set_attribute("rel", "canonical"), "canonical rel");
                self.head_append(&link);
                link
            }
        };
        report(link.set_attribute("href", href), "canonical href");
    }

    fn append_style(&self, id: &str, css: &str) {
        if self.document.get_element_by_id(id).is_some() {
            return;
        }
        let Ok(style) = self.document.create_element("style") else { return };
        style.set_id(id);
        style.set_text_content(Some(css));
        self.head_append(&style);
    }

    fn insert_html(&self, at: InsertAt, html: &str) {
        let Some(body) = self.document.body() else { return };
        let position = match at {
            InsertAt::BodyStart => "afterbegin",
            InsertAt::BodyEnd => "beforeend",
        };
        report(body.insert_adjacent_html(position, html), "insert html");
    }
}

fn set_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

fn scroll_into_view(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

impl Dom for WebDom {
    fn exists(&self, target: &Target) -> bool {
        !self.resolve(target).is_empty()
    }

    fn count(&self, selector: &Selector) -> usize {
        self.document
            .query_selector_all(&selector.to_css())
            .map(|list| list.length() as usize)
            .unwrap_or(0)
    }

    fn attr(&self, target: &Target, name: &str) -> Option<String> {
        self.resolve(target).first().and_then(|el| el.get_attribute(name))
    }

    fn has_class(&self, target: &Target, class: &str) -> bool {
        self.resolve(target).first().is_some_and(|el| el.class_list().contains(class))
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetText { target, text } => self.each(&target, |el| el.set_text_content(Some(&text))),
            Effect::SetHtml { target, html } => self.each(&target, |el| el.set_inner_html(&html)),
            Effect::InsertHtml { at, html } => self.insert_html(at, &html),
            Effect::AppendStyle { id, css } => self.append_style(&id, &css),
            Effect::SetAttr { target, name, value } => {
                self.each(&target, |el| report(el.set_attribute(&name, &value), "set attribute"))
            }
            Effect::RemoveAttr { target, name } => {
                self.each(&target, |el| report(el.remove_attribute(&name), "remove attribute"))
            }
            Effect::ToggleClass { target, class, on } => self.each(&target, |el| {
                report(el.class_list().toggle_with_force(&class, on).map(drop), "toggle class")
            }),
            Effect::SetDisabled { target, disabled } => self.each(&target, |el| {
                let result = if disabled {
                    el.set_attribute("disabled", "")
                } else {
                    el.remove_attribute("disabled")
                };
                report(result, "disabled");
            }),
            Effect::SetValue { target, value } => self.each(&target, |el| set_value(el, &value)),
            Effect::ResetForm { target } => self.each(&target, |el| {
                if let Some(form) = el.dyn_ref::<HtmlFormElement>() {
                    form.reset();
                }
            }),
            Effect::SetStyle { target, property, value } => self.each(&target, |el| {
                let Some(html) = el.dyn_ref::<HtmlElement>() else { return };
                let style = html.style();
                let result = if value.is_empty() {
                    style.remove_property(&property).map(drop)
                } else {
                    style.set_property(&property, &value)
                };
                report(result, "style");
            }),
            Effect::SetTitle(title) => self.document.set_title(&title),
            Effect::SetMeta { attr, key, content } => self.upsert_meta(attr.as_str(), &key, &content),
            Effect::SetCanonical(href) => self.set_canonical(&href),
            Effect::Focus(target) => {
                if let Some(html) = self.resolve(&target).first().and_then(|el| el.dyn_ref::<HtmlElement>().cloned()) {
                    report(html.focus(), "focus");
                }
            }
            Effect::ScrollIntoView(target) => {
                if let Some(el) = self.resolve(&target).first() {
                    scroll_into_view(el);
                }
            }
            Effect::PushHash(hash) => {
                let pushed = web_sys::window()
                    .ok_or_else(|| JsValue::from_str("no window"))
                    .and_then(|w| w.history())
                    .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&hash)));
                report(pushed, "push hash");
            }
            Effect::Navigate(url) => {
                let navigated = web_sys::window()
                    .ok_or_else(|| JsValue::from_str("no window"))
                    .and_then(|w| w.location().set_href(&url));
                report(navigated, "navigate");
            }
            Effect::Video { target, action } => self.each(&target, |el| {
                let Some(media) = el.dyn_ref::<HtmlMediaElement>() else { return };
                match action {
                    VideoAction::Load => media.load(),
                    VideoAction::Pause => report(media.pause(), "pause"),
                }
            }),
        }
    }
}
