use crate::core::dom::{Dom, Effect, Target, VideoAction};
use crate::core::lang::Lang;
use crate::layout::modal_ids as ids;
use crate::tr;

/// What to play: the source, an optional poster and the heading text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoClip {
    pub src: String,
    pub poster: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoModalEvent {
    Open(VideoClip),
    Close,
    Escape,
    OverlayClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoModal {
    lang: Lang,
    open: bool,
}

impl VideoModal {
    pub fn bind(dom: &dyn Dom, lang: Lang) -> Option<Self> {
        if !dom.exists(&Target::id(ids::VIDEO_MODAL)) || !dom.exists(&Target::id(ids::VIDEO_PLAYER)) {
            return None;
        }
        Some(Self { lang, open: false })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn handle(&mut self, event: VideoModalEvent) -> Vec<Effect> {
        match event {
            VideoModalEvent::Open(clip) => self.open(clip),
            VideoModalEvent::Close | VideoModalEvent::Escape | VideoModalEvent::OverlayClick => {
                self.close()
            }
        }
    }

    /// Loads the clip without autoplay.
    fn open(&mut self, clip: VideoClip) -> Vec<Effect> {
        self.open = true;
        let player = Target::id(ids::VIDEO_PLAYER);
        let title = if clip.title.trim().is_empty() {
            tr!(self.lang, "modal-video-title")
        } else {
            clip.title
        };

        vec![
            Effect::attr(player.clone(), "src", clip.src),
            match clip.poster.filter(|p| !p.trim().is_empty()) {
                Some(poster) => Effect::attr(player.clone(), "poster", poster),
                None => Effect::remove_attr(player.clone(), "poster"),
            },
            Effect::text(Target::id(ids::VIDEO_TITLE), title),
            Effect::Video { target: player, action: VideoAction::Load },
            Effect::class(Target::id(ids::VIDEO_MODAL), "modal-hidden", false),
            Effect::attr(Target::id(ids::VIDEO_MODAL), "aria-hidden", "false"),
            Effect::Focus(Target::id(ids::VIDEO_CLOSE)),
            Effect::lock_scroll(true),
        ]
    }

    /// Pause, then drop the source and reload so the browser stops buffering.
    fn close(&mut self) -> Vec<Effect> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        let player = Target::id(ids::VIDEO_PLAYER);
        vec![
            Effect::Video { target: player.clone(), action: VideoAction::Pause },
            Effect::remove_attr(player.clone(), "src"),
            Effect::Video { target: player, action: VideoAction::Load },
            Effect::class(Target::id(ids::VIDEO_MODAL), "modal-hidden", true),
            Effect::attr(Target::id(ids::VIDEO_MODAL), "aria-hidden", "true"),
            Effect::lock_scroll(false),
        ]
    }
}
