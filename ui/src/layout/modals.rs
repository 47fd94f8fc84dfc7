use dioxus::prelude::*;

use crate::core::lang::Lang;
use crate::tr;

/// Element ids the modal state machines target.
pub mod ids {
    pub const IMAGE_MODAL: &str = "imgModal";
    pub const IMAGE: &str = "imgModalImg";
    pub const IMAGE_CLOSE: &str = "imgModalClose";
    pub const IMAGE_PREV: &str = "imgModalPrev";
    pub const IMAGE_NEXT: &str = "imgModalNext";
    pub const IMAGE_COUNTER: &str = "imgModalCounter";

    pub const VIDEO_MODAL: &str = "videoModal";
    pub const VIDEO_PLAYER: &str = "videoModalPlayer";
    pub const VIDEO_TITLE: &str = "videoModalTitle";
    pub const VIDEO_CLOSE: &str = "videoModalClose";

    /// Full-screen backdrop inside either modal; clicks on it close.
    pub const OVERLAY_CLASS: &str = "modal-overlay";
}

/// Lightbox overlay. Gallery controls start hidden; the image modal state
/// machine reveals them when a gallery is attached.
#[component]
pub fn ImageModalMarkup(lang: Lang) -> Element {
    let title = tr!(lang, "modal-image-title");
    let close = tr!(lang, "modal-image-close");
    let prev = tr!(lang, "modal-image-prev");
    let next = tr!(lang, "modal-image-next");
    let hint_en = tr!(Lang::En, "modal-image-hint");
    let hint_pl = tr!(Lang::Pl, "modal-image-hint");
    let hint = tr!(lang, "modal-image-hint");

    rsx! {
        div { id: ids::IMAGE_MODAL, class: "modal-hidden", aria_hidden: "true",
            div { class: ids::OVERLAY_CLASS, role: "dialog", aria_modal: "true", aria_labelledby: "imgModalTitle",
                div { class: "modal-panel",
                    button { id: ids::IMAGE_CLOSE, class: "modal-close", r#type: "button", aria_label: "{close}",
                        span { aria_hidden: "true", "✕" }
                    }
                    h2 { id: "imgModalTitle", class: "sr-only", "{title}" }
                    div { class: "modal-img-wrap",
                        img { id: ids::IMAGE, class: "modal-img", src: "", alt: "" }
                        button { id: ids::IMAGE_PREV, class: "modal-nav modal-nav-prev modal-hidden", r#type: "button", aria_label: "{prev}", "‹" }
                        button { id: ids::IMAGE_NEXT, class: "modal-nav modal-nav-next modal-hidden", r#type: "button", aria_label: "{next}", "›" }
                    }
                    div { id: ids::IMAGE_COUNTER, class: "modal-counter modal-hidden", aria_live: "polite" }
                    div { class: "modal-hint", "data-en": "{hint_en}", "data-pl": "{hint_pl}", "{hint}" }
                }
            }
        }
    }
}

#[component]
pub fn VideoModalMarkup(lang: Lang) -> Element {
    let title = tr!(lang, "modal-video-title");
    let close = tr!(lang, "modal-video-close");
    let hint_en = tr!(Lang::En, "modal-video-hint");
    let hint_pl = tr!(Lang::Pl, "modal-video-hint");
    let hint = tr!(lang, "modal-video-hint");

    rsx! {
        div { id: ids::VIDEO_MODAL, class: "modal-hidden", aria_hidden: "true",
            div { class: ids::OVERLAY_CLASS, role: "dialog", aria_modal: "true", aria_labelledby: ids::VIDEO_TITLE,
                div { class: "modal-panel",
                    button { id: ids::VIDEO_CLOSE, class: "modal-close", r#type: "button", aria_label: "{close}",
                        span { aria_hidden: "true", "✕" }
                    }
                    h2 { id: ids::VIDEO_TITLE, class: "modal-video-title", "{title}" }
                    div { class: "modal-img-wrap",
                        video {
                            id: ids::VIDEO_PLAYER,
                            class: "modal-video",
                            "controls": "controls",
                            "playsinline": "playsinline",
                            "preload": "metadata",
                        }
                    }
                    div { class: "modal-hint", "data-en": "{hint_en}", "data-pl": "{hint_pl}", "{hint}" }
                }
            }
        }
    }
}
