use crate::core::dom::{Dom, Effect, Target};

pub const MENU_ID: &str = "mobileMenu";
pub const BUTTON_ID: &str = "mobileMenuBtn";
/// Viewport width (px) at which the desktop nav takes over.
pub const DESKTOP_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuEvent {
    Toggle,
    LinkClicked,
    Escape,
    Resized { width: f64 },
}

/// Open/closed state of the header's mobile menu. Open means the menu
/// element lacks the `hidden` class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// `None` when the page has no menu button or no menu.
    pub fn bind(dom: &dyn Dom) -> Option<Self> {
        let menu = Target::id(MENU_ID);
        if !dom.exists(&menu) || !dom.exists(&Target::id(BUTTON_ID)) {
            return None;
        }
        Some(Self {
            open: !dom.has_class(&menu, "hidden"),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle(&mut self, event: MenuEvent) -> Vec<Effect> {
        match event {
            MenuEvent::Toggle if self.open => self.close(),
            MenuEvent::Toggle => self.set(true),
            MenuEvent::LinkClicked | MenuEvent::Escape => self.close(),
            MenuEvent::Resized { width } if width >= DESKTOP_BREAKPOINT_PX => self.close(),
            MenuEvent::Resized { .. } => Vec::new(),
        }
    }

    pub fn close(&mut self) -> Vec<Effect> {
        if self.open {
            self.set(false)
        } else {
            Vec::new()
        }
    }

    fn set(&mut self, open: bool) -> Vec<Effect> {
        self.open = open;
        vec![
            Effect::class(Target::id(MENU_ID), "hidden", !open),
            Effect::attr(Target::id(BUTTON_ID), "aria-expanded", open.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryElement};

    fn dom() -> MemoryDom {
        MemoryDom::new()
            .with(MemoryElement::new("button").with_id(BUTTON_ID).with_attr("aria-expanded", "false"))
            .with(MemoryElement::new("div").with_id(MENU_ID).with_class("hidden"))
    }

    #[test]
    fn toggle_opens_and_closes() {
        let mut dom = dom();
        let mut menu = MobileMenu::bind(&dom).unwrap();
        assert!(!menu.is_open());

        dom.apply_all(menu.handle(MenuEvent::Toggle));
        assert!(menu.is_open());
        assert!(!dom.element(MENU_ID).unwrap().has_class("hidden"));
        assert_eq!(dom.element(BUTTON_ID).unwrap().attr("aria-expanded"), Some("true"));

        dom.apply_all(menu.handle(MenuEvent::Toggle));
        assert!(dom.element(MENU_ID).unwrap().has_class("hidden"));
        assert_eq!(dom.element(BUTTON_ID).unwrap().attr("aria-expanded"), Some("false"));
    }

    #[test]
    fn closes_on_link_escape_and_wide_viewport() {
        for event in [
            MenuEvent::LinkClicked,
            MenuEvent::Escape,
            MenuEvent::Resized { width: 1024.0 },
        ] {
            let mut menu = MobileMenu::default();
            menu.handle(MenuEvent::Toggle);
            assert!(!menu.handle(event).is_empty());
            assert!(!menu.is_open(), "{event:?}");
        }
    }

    #[test]
    fn narrow_resize_keeps_menu_open() {
        let mut menu = MobileMenu::default();
        menu.handle(MenuEvent::Toggle);
        assert!(menu.handle(MenuEvent::Resized { width: 500.0 }).is_empty());
        assert!(menu.is_open());
    }

    #[test]
    fn missing_markup_disables_the_menu() {
        let dom = MemoryDom::new().with(MemoryElement::new("div").with_id(MENU_ID));
        assert!(MobileMenu::bind(&dom).is_none());
    }
}
