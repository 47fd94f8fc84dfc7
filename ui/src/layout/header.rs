use dioxus::prelude::*;

use crate::core::lang::{build_index_url, Lang};
use crate::tr;

/// Index sections linked from the header, in display order.
pub const NAV_SECTIONS: [&str; 4] = ["hero", "products", "about", "contact"];

const DESKTOP_LINK_CLASS: &str = "site-nav-link hover:text-blue-400 focus:outline-none focus:ring-2 focus:ring-blue-400/60 rounded px-1";
const MOBILE_LINK_CLASS: &str = "site-nav-link mobile-link block rounded px-3 py-2 hover:bg-white/10 hover:text-blue-400";
const LANG_BUTTON_CLASS: &str = "lang-btn hover:text-blue-400 focus:outline-none focus:ring-2 focus:ring-blue-400/60 rounded px-1";

fn nav_label(lang: Lang, section: &str) -> String {
    match section {
        "hero" => tr!(lang, "nav-home"),
        "products" => tr!(lang, "nav-products"),
        "about" => tr!(lang, "nav-about"),
        _ => tr!(lang, "nav-contact"),
    }
}

#[derive(Clone, PartialEq)]
struct NavEntry {
    section: &'static str,
    href: String,
    en: String,
    pl: String,
    current: String,
}

fn nav_entries(lang: Lang) -> Vec<NavEntry> {
    NAV_SECTIONS
        .iter()
        .map(|&section| NavEntry {
            section,
            href: build_index_url(lang, section),
            en: nav_label(Lang::En, section),
            pl: nav_label(Lang::Pl, section),
            current: nav_label(lang, section),
        })
        .collect()
}

#[component]
fn LangSwitch() -> Element {
    rsx! {
        div { class: "flex items-center gap-2 text-sm",
            button { r#type: "button", "data-lang": "en", class: LANG_BUTTON_CLASS, "EN" }
            span { class: "text-gray-400", "|" }
            button { r#type: "button", "data-lang": "pl", class: LANG_BUTTON_CLASS, "PL" }
        }
    }
}

/// Fixed site header: logo, section links, language switch, mobile menu.
#[component]
pub fn SiteHeader(lang: Lang) -> Element {
    let entries = nav_entries(lang);
    let logo_href = build_index_url(lang, "products");
    let logo_label = tr!(lang, "nav-logo-label");
    let logo_alt = tr!(lang, "nav-logo-alt");
    let menu_label = tr!(lang, "nav-menu-open");
    let primary_label = tr!(lang, "nav-primary-label");
    let mobile_label = tr!(lang, "nav-mobile-label");

    rsx! {
        header { class: "bg-gray-800/90 backdrop-blur border-b border-white/5 fixed w-full z-10 shadow-md",
            div { class: "container mx-auto px-4 py-3 flex items-center justify-between gap-4",
                a { href: "{logo_href}", class: "flex items-center", aria_label: "{logo_label}",
                    img {
                        src: "/logo.png",
                        alt: "{logo_alt}",
                        class: "w-auto object-contain shrink-0 h-[clamp(34px,4.5vw,64px)]",
                        "loading": "eager",
                    }
                }

                div { class: "hidden md:flex items-center gap-8",
                    nav { aria_label: "{primary_label}",
                        ul { class: "flex items-center gap-8",
                            for entry in entries.iter() {
                                li { key: "{entry.section}",
                                    a {
                                        href: "{entry.href}",
                                        class: DESKTOP_LINK_CLASS,
                                        "data-en": "{entry.en}",
                                        "data-pl": "{entry.pl}",
                                        "{entry.current}"
                                    }
                                }
                            }
                        }
                    }
                    LangSwitch {}
                }

                div { class: "flex md:hidden items-center gap-3",
                    LangSwitch {}
                    button {
                        id: "mobileMenuBtn",
                        r#type: "button",
                        class: "inline-flex items-center justify-center rounded p-2 hover:bg-white/10 focus:outline-none focus:ring-2 focus:ring-blue-400/60",
                        aria_controls: "mobileMenu",
                        aria_expanded: "false",
                        aria_label: "{menu_label}",
                        svg {
                            "class": "h-6 w-6",
                            "fill": "none",
                            "viewBox": "0 0 24 24",
                            "stroke": "currentColor",
                            "stroke-width": "2",
                            "aria-hidden": "true",
                            path {
                                "stroke-linecap": "round",
                                "stroke-linejoin": "round",
                                "d": "M4 6h16M4 12h16M4 18h16",
                            }
                        }
                    }
                }
            }

            div { id: "mobileMenu", class: "md:hidden hidden border-t border-white/5 bg-gray-800/95 backdrop-blur",
                nav { class: "container mx-auto px-4 py-3", aria_label: "{mobile_label}",
                    ul { class: "flex flex-col gap-2",
                        for entry in entries.iter() {
                            li { key: "{entry.section}",
                                a {
                                    href: "{entry.href}",
                                    class: MOBILE_LINK_CLASS,
                                    "data-en": "{entry.en}",
                                    "data-pl": "{entry.pl}",
                                    "{entry.current}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SiteFooter(lang: Lang) -> Element {
    let copyright = tr!(lang, "footer-copyright");
    rsx! {
        footer { class: "bg-gray-900 py-6 text-center text-gray-400", "{copyright}" }
    }
}
