//! Cookie consent banner.
//!
//! The site sets only technical cookies; the banner records that the
//! visitor has seen the notice. The flag lives in local storage, falling
//! back to a first-party cookie when storage is blocked. Storage failures
//! never keep the banner on screen.

use crate::config::{ConsentConfig, RejectPolicy};
use crate::core::dom::{Dom, Effect, InsertAt, Selector, Target};
use crate::core::lang::Lang;
use crate::core::storage::{CookieStore, KeyValueStore};
use crate::layout::{render_cookie_banner, BANNER_ID};

/// Cookie written by earlier site versions (`"1"` meant accepted).
pub const LEGACY_COOKIE: &str = "forgemotion_cookies_accepted_v1";
const BANNER_Z_INDEX: &str = "2147483000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Accepted,
    Rejected,
}

impl ConsentChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsentChoice::Accepted => "accepted",
            ConsentChoice::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "accepted" | "1" => Some(ConsentChoice::Accepted),
            "rejected" => Some(ConsentChoice::Rejected),
            _ => None,
        }
    }
}

/// Local storage first, cookie second.
pub struct ConsentStore<'a> {
    local: &'a dyn KeyValueStore,
    cookies: &'a dyn CookieStore,
    config: &'a ConsentConfig,
}

impl<'a> ConsentStore<'a> {
    pub fn new(local: &'a dyn KeyValueStore, cookies: &'a dyn CookieStore, config: &'a ConsentConfig) -> Self {
        Self { local, cookies, config }
    }

    pub fn read(&self) -> Option<ConsentChoice> {
        let key = self.config.storage_key.as_str();
        match self.local.get(key) {
            Ok(Some(value)) => {
                if let Some(choice) = ConsentChoice::parse(&value) {
                    return Some(choice);
                }
            }
            Ok(None) => {}
            Err(err) => tracing::debug!(%err, "consent flag unreadable from local storage"),
        }
        for name in [key, LEGACY_COOKIE] {
            match self.cookies.cookie(name) {
                Ok(Some(value)) => {
                    if let Some(choice) = ConsentChoice::parse(&value) {
                        return Some(choice);
                    }
                }
                Ok(None) => {}
                Err(err) => tracing::debug!(%err, cookie = name, "consent cookie unreadable"),
            }
        }
        None
    }

    /// Best effort; `false` when neither mechanism accepted the write.
    pub fn write(&self, choice: ConsentChoice) -> bool {
        let key = self.config.storage_key.as_str();
        let local_err = match self.local.set(key, choice.as_str()) {
            Ok(()) => return true,
            Err(err) => err,
        };
        match self.cookies.set_cookie(key, choice.as_str(), self.config.cookie_days) {
            Ok(()) => true,
            Err(cookie_err) => {
                tracing::warn!(%local_err, %cookie_err, "consent choice not persisted");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerEvent {
    Accept,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CookieBanner {
    config: ConsentConfig,
    visible: bool,
}

fn hide() -> Vec<Effect> {
    vec![
        Effect::class(Target::id(BANNER_ID), "hidden", true),
        Effect::attr(Target::id(BANNER_ID), "aria-hidden", "true"),
    ]
}

/// Point `data-en-href` / `data-pl-href` links at the active language.
fn privacy_links(dom: &dyn Dom, lang: Lang) -> Vec<Effect> {
    let selector = Selector::Attr("data-en-href");
    let wanted = format!("{}-href", lang.data_attr());
    dom.attrs_of(&selector, &wanted)
        .into_iter()
        .zip(dom.attrs_of(&selector, "data-en-href"))
        .enumerate()
        .filter_map(|(i, (href, fallback))| {
            href.or(fallback)
                .map(|href| Effect::attr(Target::Nth(selector.clone(), i), "href", href))
        })
        .collect()
}

fn show(dom: &dyn Dom, lang: Lang) -> Vec<Effect> {
    let banner = Target::id(BANNER_ID);
    let mut effects = vec![
        Effect::SetStyle {
            target: banner.clone(),
            property: "z-index".into(),
            value: BANNER_Z_INDEX.into(),
        },
        Effect::SetStyle {
            target: banner.clone(),
            property: "pointer-events".into(),
            value: "auto".into(),
        },
        Effect::class(banner.clone(), "hidden", false),
        Effect::remove_attr(banner, "aria-hidden"),
    ];
    effects.extend(privacy_links(dom, lang));
    effects
}

impl CookieBanner {
    /// Decide visibility from the stored flag. Without page markup the
    /// banner is injected (unless disabled), and `None` means there is no
    /// banner to drive.
    pub fn init(
        dom: &dyn Dom,
        store: &ConsentStore<'_>,
        config: ConsentConfig,
        lang: Lang,
    ) -> Option<(Self, Vec<Effect>)> {
        let has_markup = dom.exists(&Target::id(BANNER_ID));

        if let Some(choice) = store.read() {
            tracing::debug!(choice = choice.as_str(), "consent already recorded");
            let effects = if has_markup { hide() } else { Vec::new() };
            return Some((Self { config, visible: false }, effects));
        }

        let mut effects = Vec::new();
        if !has_markup {
            if !config.inject_banner {
                return None;
            }
            effects.push(Effect::InsertHtml {
                at: InsertAt::BodyEnd,
                html: render_cookie_banner(lang),
            });
        }
        effects.extend(show(dom, lang));
        Some((Self { config, visible: true }, effects))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn choice_for(&self, event: BannerEvent) -> ConsentChoice {
        match (event, self.config.reject_policy) {
            (BannerEvent::Accept, _) | (BannerEvent::Reject, RejectPolicy::SameAsAccept) => ConsentChoice::Accepted,
            (BannerEvent::Reject, RejectPolicy::DismissOnly) => ConsentChoice::Rejected,
        }
    }

    /// Persist (best effort) and hide immediately.
    pub fn choose(&mut self, event: BannerEvent, store: &ConsentStore<'_>) -> Vec<Effect> {
        let choice = self.choice_for(event);
        store.write(choice);
        self.visible = false;
        hide()
    }
}
