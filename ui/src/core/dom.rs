//! The seam between feature logic and the live document.
//!
//! Features never touch the browser directly. They read what they need
//! through [`Dom`] and return a list of [`Effect`]s; the platform adapter
//! (web-sys on wasm, [`MemoryDom`](super::memory::MemoryDom) in tests)
//! performs them.

/// Structural selectors the features query by. Kept deliberately small so
/// the in-memory document can match them without a CSS engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `.class`
    Class(&'static str),
    /// `[attr]`
    Attr(&'static str),
    /// `[attr="value"]`
    AttrValue(&'static str, String),
}

impl Selector {
    pub fn to_css(&self) -> String {
        match self {
            Selector::Class(class) => format!(".{class}"),
            Selector::Attr(attr) => format!("[{attr}]"),
            Selector::AttrValue(attr, value) => {
                format!("[{attr}=\"{}\"]", value.replace('\\', "\\\\").replace('"', "\\\""))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    /// Every element matching the selector.
    All(Selector),
    /// The `n`th match in document order.
    Nth(Selector, usize),
    /// `<html>`
    Root,
    Body,
}

impl Target {
    pub fn id(id: impl Into<String>) -> Self {
        Target::Id(id.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    BodyStart,
    BodyEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoAction {
    Load,
    Pause,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetText { target: Target, text: String },
    SetHtml { target: Target, html: String },
    InsertHtml { at: InsertAt, html: String },
    /// Append a `<style id=..>` to the head unless one with that id exists.
    AppendStyle { id: String, css: String },
    SetAttr { target: Target, name: String, value: String },
    RemoveAttr { target: Target, name: String },
    ToggleClass { target: Target, class: String, on: bool },
    SetDisabled { target: Target, disabled: bool },
    /// Form control value.
    SetValue { target: Target, value: String },
    ResetForm { target: Target },
    SetStyle { target: Target, property: String, value: String },
    SetTitle(String),
    /// Create-or-update `<meta {attr}="{key}" content=..>`.
    SetMeta { attr: MetaAttr, key: String, content: String },
    SetCanonical(String),
    Focus(Target),
    ScrollIntoView(Target),
    /// `history.pushState` to `#hash` without navigating.
    PushHash(String),
    Navigate(String),
    Video { target: Target, action: VideoAction },
}

impl Effect {
    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Effect::SetText { target, text: text.into() }
    }

    pub fn attr(target: Target, name: &str, value: impl Into<String>) -> Self {
        Effect::SetAttr { target, name: name.to_string(), value: value.into() }
    }

    pub fn remove_attr(target: Target, name: &str) -> Self {
        Effect::RemoveAttr { target, name: name.to_string() }
    }

    pub fn class(target: Target, class: &str, on: bool) -> Self {
        Effect::ToggleClass { target, class: class.to_string(), on }
    }

    pub fn value(target: Target, value: impl Into<String>) -> Self {
        Effect::SetValue { target, value: value.into() }
    }

    /// Lock or restore page scrolling behind an overlay.
    pub fn lock_scroll(locked: bool) -> Self {
        Effect::SetStyle {
            target: Target::Body,
            property: "overflow".into(),
            value: if locked { "hidden".into() } else { String::new() },
        }
    }
}

/// Read access plus effect application for one document.
pub trait Dom {
    fn exists(&self, target: &Target) -> bool;
    fn count(&self, selector: &Selector) -> usize;
    /// Attribute of the first element `target` resolves to.
    fn attr(&self, target: &Target, name: &str) -> Option<String>;
    fn has_class(&self, target: &Target, class: &str) -> bool;
    fn apply(&mut self, effect: Effect);

    fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    /// `name` of every element matching `selector`, in document order.
    fn attrs_of(&self, selector: &Selector, name: &str) -> Vec<Option<String>> {
        (0..self.count(selector))
            .map(|i| self.attr(&Target::Nth(selector.clone(), i), name))
            .collect()
    }
}
