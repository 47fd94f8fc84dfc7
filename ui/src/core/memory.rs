//! In-memory document implementing [`Dom`]. Drives every feature in tests
//! without a browser; injected HTML fragments are recorded, not parsed.

use std::collections::{BTreeMap, BTreeSet};

use super::dom::{Dom, Effect, InsertAt, MetaAttr, Selector, Target, VideoAction};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub html: String,
    pub value: String,
    pub disabled: bool,
    pub focused: bool,
    pub style: BTreeMap<String, String>,
    pub video_log: Vec<VideoAction>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(class) => self.classes.contains(*class),
            Selector::Attr(name) => self.attrs.contains_key(*name),
            Selector::AttrValue(name, value) => self.attrs.get(*name) == Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Body,
    At(usize),
}

#[derive(Debug, Default)]
pub struct MemoryDom {
    root: MemoryElement,
    body: MemoryElement,
    elements: Vec<MemoryElement>,
    title: String,
    metas: BTreeMap<(MetaAttr, String), String>,
    canonical: Option<String>,
    inserted: Vec<(InsertAt, String)>,
    history: Vec<String>,
    navigations: Vec<String>,
    scrolled_to: Vec<String>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            root: MemoryElement::new("html"),
            body: MemoryElement::new("body"),
            ..Self::default()
        }
    }

    pub fn with(mut self, element: MemoryElement) -> Self {
        self.push(element);
        self
    }

    pub fn push(&mut self, element: MemoryElement) {
        self.elements.push(element);
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|el| el.id.as_deref() == Some(id))
    }

    pub fn nth(&self, selector: &Selector, index: usize) -> Option<&MemoryElement> {
        self.elements.iter().filter(|el| el.matches(selector)).nth(index)
    }

    pub fn root(&self) -> &MemoryElement {
        &self.root
    }

    pub fn body(&self) -> &MemoryElement {
        &self.body
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.metas.get(&(attr, key.to_string())).map(String::as_str)
    }

    pub fn meta_count(&self) -> usize {
        self.metas.len()
    }

    pub fn canonical(&self) -> Option<&str> {
        self.canonical.as_deref()
    }

    pub fn inserted(&self) -> &[(InsertAt, String)] {
        &self.inserted
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn scrolled_to(&self) -> &[String] {
        &self.scrolled_to
    }

    fn resolve(&self, target: &Target) -> Vec<Slot> {
        match target {
            Target::Root => vec![Slot::Root],
            Target::Body => vec![Slot::Body],
            Target::Id(id) => self
                .elements
                .iter()
                .position(|el| el.id.as_deref() == Some(id.as_str()))
                .map(Slot::At)
                .into_iter()
                .collect(),
            Target::All(selector) => self.matching(selector).collect(),
            Target::Nth(selector, n) => self.matching(selector).nth(*n).into_iter().collect(),
        }
    }

    fn matching<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = Slot> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, el)| el.matches(selector))
            .map(|(i, _)| Slot::At(i))
    }

    fn slot(&self, slot: Slot) -> &MemoryElement {
        match slot {
            Slot::Root => &self.root,
            Slot::Body => &self.body,
            Slot::At(i) => &self.elements[i],
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut MemoryElement {
        match slot {
            Slot::Root => &mut self.root,
            Slot::Body => &mut self.body,
            Slot::At(i) => &mut self.elements[i],
        }
    }

    fn each(&mut self, target: &Target, mut f: impl FnMut(&mut MemoryElement)) {
        for slot in self.resolve(target) {
            f(self.slot_mut(slot));
        }
    }

    fn first(&self, target: &Target) -> Option<&MemoryElement> {
        self.resolve(target).first().map(|slot| self.slot(*slot))
    }
}

impl Dom for MemoryDom {
    fn exists(&self, target: &Target) -> bool {
        !self.resolve(target).is_empty()
    }

    fn count(&self, selector: &Selector) -> usize {
        self.matching(selector).count()
    }

    fn attr(&self, target: &Target, name: &str) -> Option<String> {
        let el = self.first(target)?;
        if name == "id" {
            return el.id.clone();
        }
        el.attrs.get(name).cloned()
    }

    fn has_class(&self, target: &Target, class: &str) -> bool {
        self.first(target).is_some_and(|el| el.has_class(class))
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetText { target, text } => self.each(&target, |el| el.text = text.clone()),
            Effect::SetHtml { target, html } => self.each(&target, |el| el.html = html.clone()),
            Effect::InsertHtml { at, html } => self.inserted.push((at, html)),
            Effect::AppendStyle { id, css } => {
                if !self.exists(&Target::Id(id.clone())) {
                    self.push(MemoryElement::new("style").with_id(&id).with_text(&css));
                }
            }
            Effect::SetAttr { target, name, value } => self.each(&target, |el| {
                el.attrs.insert(name.clone(), value.clone());
            }),
            Effect::RemoveAttr { target, name } => self.each(&target, |el| {
                el.attrs.remove(&name);
            }),
            Effect::ToggleClass { target, class, on } => self.each(&target, |el| {
                if on {
                    el.classes.insert(class.clone());
                } else {
                    el.classes.remove(&class);
                }
            }),
            Effect::SetDisabled { target, disabled } => self.each(&target, |el| el.disabled = disabled),
            Effect::SetValue { target, value } => self.each(&target, |el| el.value = value.clone()),
            Effect::ResetForm { .. } => {
                for el in &mut self.elements {
                    if matches!(el.tag.as_str(), "input" | "textarea" | "select") {
                        el.value.clear();
                    }
                }
            }
            Effect::SetStyle { target, property, value } => self.each(&target, |el| {
                if value.is_empty() {
                    el.style.remove(&property);
                } else {
                    el.style.insert(property.clone(), value.clone());
                }
            }),
            Effect::SetTitle(title) => self.title = title,
            Effect::SetMeta { attr, key, content } => {
                self.metas.insert((attr, key), content);
            }
            Effect::SetCanonical(href) => self.canonical = Some(href),
            Effect::Focus(target) => {
                for el in &mut self.elements {
                    el.focused = false;
                }
                self.each(&target, |el| el.focused = true);
            }
            Effect::ScrollIntoView(target) => {
                if let Some(id) = self.first(&target).and_then(|el| el.id.clone()) {
                    self.scrolled_to.push(id);
                }
            }
            Effect::PushHash(hash) => self.history.push(hash),
            Effect::Navigate(url) => self.navigations.push(url),
            Effect::Video { target, action } => self.each(&target, |el| el.video_log.push(action)),
        }
    }
}
