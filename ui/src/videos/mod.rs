//! Video demos: the manifest model and its binding to the page.

pub mod hydrate;
pub mod manifest;

pub use hydrate::{candidate_urls, demo_clip, extra_clip, hydrate, load_catalog, relabel};
pub use manifest::{normalize, parse_manifest, LocalizedText, VideoCatalog, VideoDescriptor, HERO_KEY};
