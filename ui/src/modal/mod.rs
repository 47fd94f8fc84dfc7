//! Full-screen image and video overlays.

pub mod image;
pub mod video;

pub use image::{GalleryImage, ImageModal, ImageModalEvent, ImageTrigger, SWIPE_THRESHOLD_PX};
pub use video::{VideoClip, VideoModal, VideoModalEvent};
