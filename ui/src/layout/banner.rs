use dioxus::prelude::*;

use crate::core::lang::Lang;
use crate::tr;

pub const BANNER_ID: &str = "cookieBanner";
pub const ACCEPT_ID: &str = "cookieAcceptBtn";
pub const REJECT_ID: &str = "cookieRejectBtn";

const PRIVACY_EN: &str = "/en/privacy.html";
const PRIVACY_PL: &str = "/pl/privacy.html";

/// Consent banner for pages that do not ship their own markup. Rendered
/// hidden; the consent machine decides whether to reveal it.
#[component]
pub fn CookieBannerMarkup(lang: Lang) -> Element {
    let label = tr!(lang, "cookie-label");
    let (text_en, text_pl) = (tr!(Lang::En, "cookie-text"), tr!(Lang::Pl, "cookie-text"));
    let (privacy_en, privacy_pl) = (tr!(Lang::En, "cookie-privacy"), tr!(Lang::Pl, "cookie-privacy"));
    let (accept_en, accept_pl) = (tr!(Lang::En, "cookie-accept"), tr!(Lang::Pl, "cookie-accept"));
    let (reject_en, reject_pl) = (tr!(Lang::En, "cookie-reject"), tr!(Lang::Pl, "cookie-reject"));
    let pick = |en: &str, pl: &str| match lang {
        Lang::En => en.to_string(),
        Lang::Pl => pl.to_string(),
    };
    let text = pick(&text_en, &text_pl);
    let privacy = pick(&privacy_en, &privacy_pl);
    let privacy_href = pick(PRIVACY_EN, PRIVACY_PL);
    let accept = pick(&accept_en, &accept_pl);
    let reject = pick(&reject_en, &reject_pl);

    rsx! {
        div {
            id: BANNER_ID,
            class: "hidden fixed inset-x-0 bottom-0 z-50 bg-gray-900/95 border-t border-white/10 backdrop-blur",
            role: "dialog",
            aria_label: "{label}",
            aria_hidden: "true",
            div { class: "container mx-auto px-4 py-4 flex flex-col md:flex-row items-start md:items-center gap-4",
                p { class: "text-sm text-gray-300 flex-1",
                    span { "data-en": "{text_en}", "data-pl": "{text_pl}", "{text}" }
                    " "
                    a {
                        class: "underline hover:text-blue-400",
                        href: "{privacy_href}",
                        "data-en-href": PRIVACY_EN,
                        "data-pl-href": PRIVACY_PL,
                        "data-en": "{privacy_en}",
                        "data-pl": "{privacy_pl}",
                        "{privacy}"
                    }
                }
                div { class: "flex gap-2",
                    button {
                        id: REJECT_ID,
                        r#type: "button",
                        class: "px-4 py-2 rounded border border-white/20 hover:bg-white/10",
                        "data-en": "{reject_en}",
                        "data-pl": "{reject_pl}",
                        "{reject}"
                    }
                    button {
                        id: ACCEPT_ID,
                        r#type: "button",
                        class: "px-4 py-2 rounded bg-blue-600 hover:bg-blue-500 font-semibold",
                        "data-en": "{accept_en}",
                        "data-pl": "{accept_pl}",
                        "{accept}"
                    }
                }
            }
        }
    }
}
