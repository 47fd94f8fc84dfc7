use crate::core::dom::{Dom, Effect, Target};
use crate::core::lang::strip_trailing_slash;
use crate::core::location::Location;

/// A click on an `<a href*="#">`, as reported by the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorClick {
    pub href: String,
    /// `MouseEvent.button`; 0 is the primary button.
    pub button: i16,
    /// Any of meta/ctrl/shift/alt held.
    pub modifiers: bool,
    pub default_prevented: bool,
}

/// Id of the in-page element the click should scroll to, or `None` when the
/// browser should handle the click itself (other page, other origin,
/// modified click, missing target).
pub fn anchor_target(click: &AnchorClick, location: &Location, dom: &dyn Dom) -> Option<String> {
    if click.default_prevented || click.button != 0 || click.modifiers {
        return None;
    }
    let url = location.resolve(click.href.trim())?;
    if !location.same_origin(&url) {
        return None;
    }
    if strip_trailing_slash(url.path()) != strip_trailing_slash(location.path()) {
        return None;
    }
    let id = url.fragment().filter(|f| !f.is_empty())?.to_string();
    dom.exists(&Target::id(id.as_str())).then_some(id)
}

pub fn scroll_to(id: &str) -> Vec<Effect> {
    vec![
        Effect::ScrollIntoView(Target::id(id)),
        Effect::PushHash(format!("#{id}")),
    ]
}
