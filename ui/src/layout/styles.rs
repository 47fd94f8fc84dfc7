//! Stylesheet injected once per document (marker id [`STYLE_ID`]).

pub const STYLE_ID: &str = "siteLayoutStyles";

const BASE_CSS: &str = r#"
html { scroll-padding-top: 90px; scroll-behavior: smooth; }
@media (prefers-reduced-motion: reduce) { html { scroll-behavior: auto; } }

.fade-in { opacity: 0; transform: translateY(16px); animation: fadeInUp .9s forwards; }
@keyframes fadeInUp { to { opacity: 1; transform: translateY(0); } }

.nav-active { color: rgb(96 165 250) !important; }
"#;

const MODAL_CSS: &str = r#"
.modal-hidden { display: none; }
.modal-overlay {
  position: fixed; inset: 0; background: rgba(0,0,0,0.72); z-index: 50;
  display: flex; align-items: center; justify-content: center; padding: 1rem;
}
.modal-panel {
  width: min(1100px, 96vw); max-height: 90vh;
  background: rgba(17,24,39,0.96);
  border: 1px solid rgba(255,255,255,0.08);
  border-radius: 1rem; overflow: hidden;
  box-shadow: 0 20px 70px rgba(0,0,0,0.5);
  position: relative;
}
.modal-close {
  position: absolute; top: 10px; right: 10px; z-index: 2;
  background: rgba(255,255,255,0.12);
  border: 1px solid rgba(255,255,255,0.18);
  border-radius: 999px; width: 40px; height: 40px;
  display: inline-flex; align-items: center; justify-content: center;
  cursor: pointer;
}
.modal-close:hover { background: rgba(255,255,255,0.18); }
.modal-img-wrap { padding: .75rem; position: relative; }
.modal-img, .modal-video {
  width: 100%; height: auto; max-height: calc(90vh - 1.5rem);
  object-fit: contain; border-radius: .75rem; display: block;
}
.modal-nav {
  position: absolute; top: 50%; transform: translateY(-50%);
  width: 44px; height: 44px; border-radius: 999px;
  background: rgba(0,0,0,0.45); border: 1px solid rgba(255,255,255,0.18);
  font-size: 1.75rem; line-height: 1; cursor: pointer;
}
.modal-nav-prev { left: 1.25rem; }
.modal-nav-next { right: 1.25rem; }
.modal-nav.modal-hidden, .modal-counter.modal-hidden { display: none; }
.modal-counter { text-align: center; color: rgba(255,255,255,0.75); font-size: .9rem; }
.modal-video-title { padding: .95rem 3.5rem 0 .95rem; font-weight: 600; }
.modal-hint {
  padding: 0 .95rem .95rem .95rem;
  color: rgba(255,255,255,0.75);
  font-size: .95rem; text-align: center;
}
.sr-only {
  position: absolute; width: 1px; height: 1px; padding: 0; margin: -1px;
  overflow: hidden; clip: rect(0,0,0,0); white-space: nowrap; border: 0;
}
"#;

pub fn global_css(include_modal: bool) -> String {
    if include_modal {
        format!("{BASE_CSS}{MODAL_CSS}")
    } else {
        BASE_CSS.to_string()
    }
}
