//! Header behaviors: mobile menu, in-page anchor scrolling, scrollspy and
//! the language buttons.

pub mod anchor;
pub mod lang_switch;
pub mod menu;
pub mod scrollspy;

pub use anchor::{anchor_target, scroll_to, AnchorClick};
pub use lang_switch::{lang_switch, LangSwitch};
pub use menu::{MenuEvent, MobileMenu};
pub use scrollspy::{FrameThrottle, Scrollspy, SectionSample};
