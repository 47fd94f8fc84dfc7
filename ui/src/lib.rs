//! Client-side behavior for the ForgeMotion Systems site, independent of the
//! browser. Features are state machines that read the page through
//! [`core::dom::Dom`] and answer with effects; the `web` crate applies them.

pub mod config;
pub mod core;
pub mod i18n;

pub mod app;
pub mod consent;
pub mod context;
pub mod layout;
pub mod lead_form;
pub mod localize;
pub mod modal;
pub mod nav;
pub mod videos;

pub use app::{PageEvent, SiteLayout};
pub use context::AppContext;
