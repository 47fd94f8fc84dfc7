//! Page-scoped application context handed to every feature initializer.

use std::rc::Rc;

use crate::config::SiteOptions;
use crate::core::lang::{self, Lang};
use crate::core::location::Location;
use crate::core::storage::KeyValueStore;
use crate::layout::LayoutConfig;

#[derive(Clone)]
pub struct AppContext {
    pub lang: Lang,
    pub location: Location,
    pub store: Rc<dyn KeyValueStore>,
    pub options: SiteOptions,
}

impl AppContext {
    /// Resolves the language from the path, then the stored preference.
    pub fn new(location: Location, store: Rc<dyn KeyValueStore>, options: SiteOptions) -> Self {
        let lang = lang::detect(location.path(), store.as_ref());
        Self {
            lang,
            location,
            store,
            options,
        }
    }

    pub fn layout(&self) -> LayoutConfig {
        LayoutConfig::from(&self.options)
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("lang", &self.lang)
            .field("location", &self.location.href())
            .finish_non_exhaustive()
    }
}
