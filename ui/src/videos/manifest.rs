//! Manifest normalization.
//!
//! Two document shapes are accepted:
//!
//! ```json
//! { "6dof": [ { "src": "...", "title": "..." } ], "belt": [ ... ] }
//! { "videos": [ { "key": "6dof", "src": "...", "title": { "en": "...", "pl": "..." } } ] }
//! ```
//!
//! Both land in one [`VideoCatalog`]. Titles and descriptions may be plain
//! strings, per-language objects, or flat `titleEn` / `titlePl` style
//! fields. Entries without a usable `src` (or, in the wrapped shape, a
//! `key`) are logged and dropped.

use serde::Deserialize;
use serde_json::Value;

use crate::core::fetch::FetchError;
use crate::core::lang::Lang;

/// Topic whose first clip drives the hero player.
pub const HERO_KEY: &str = "6dof";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawManifest {
    Wrapped { videos: Vec<Value> },
    Flat(serde_json::Map<String, Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawText {
    Plain(String),
    Localized {
        #[serde(default)]
        en: Option<String>,
        #[serde(default)]
        pl: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawVideo {
    #[serde(alias = "category", alias = "topic")]
    key: Option<String>,
    #[serde(alias = "url", alias = "file")]
    src: Option<String>,
    #[serde(alias = "thumbnail", alias = "thumb")]
    poster: Option<String>,
    #[serde(alias = "name")]
    title: Option<RawText>,
    #[serde(alias = "title_en")]
    title_en: Option<String>,
    #[serde(alias = "title_pl")]
    title_pl: Option<String>,
    #[serde(alias = "description")]
    desc: Option<RawText>,
    #[serde(alias = "desc_en", alias = "descriptionEn")]
    desc_en: Option<String>,
    #[serde(alias = "desc_pl", alias = "descriptionPl")]
    desc_pl: Option<String>,
}

/// Text with optional English and Polish variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    pub en: Option<String>,
    pub pl: Option<String>,
}

impl LocalizedText {
    fn build(bag: Option<RawText>, flat_en: Option<String>, flat_pl: Option<String>) -> Self {
        let clean = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let (en, pl) = match bag {
            Some(RawText::Localized { en, pl }) => (clean(en), clean(pl)),
            // A bare string is the English copy.
            Some(RawText::Plain(text)) => (clean(Some(text)), None),
            None => (None, None),
        };
        Self {
            en: en.or_else(|| clean(flat_en)),
            pl: pl.or_else(|| clean(flat_pl)),
        }
    }

    /// Requested language, then the other one, then empty.
    pub fn resolve(&self, lang: Lang) -> &str {
        let (first, second) = match lang {
            Lang::En => (&self.en, &self.pl),
            Lang::Pl => (&self.pl, &self.en),
        };
        first.as_deref().or(second.as_deref()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_none() && self.pl.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDescriptor {
    pub key: String,
    pub src: String,
    pub poster: Option<String>,
    pub title: LocalizedText,
    pub desc: LocalizedText,
}

impl VideoDescriptor {
    fn from_raw(fallback_key: Option<&str>, raw: RawVideo) -> Option<Self> {
        let key = raw
            .key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| fallback_key.map(str::to_string))?;
        let src = raw.src.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())?;
        Some(Self {
            key,
            src,
            poster: raw.poster.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            title: LocalizedText::build(raw.title, raw.title_en, raw.title_pl),
            desc: LocalizedText::build(raw.desc, raw.desc_en, raw.desc_pl),
        })
    }
}

/// Clips grouped by topic key, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoCatalog {
    groups: Vec<(String, Vec<VideoDescriptor>)>,
}

impl VideoCatalog {
    fn push(&mut self, video: VideoDescriptor) {
        match self.groups.iter_mut().find(|(key, _)| *key == video.key) {
            Some((_, list)) => list.push(video),
            None => self.groups.push((video.key.clone(), vec![video])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clips(&self, key: &str) -> &[VideoDescriptor] {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, list)| list.as_slice())
            .unwrap_or_default()
    }

    pub fn first(&self, key: &str) -> Option<&VideoDescriptor> {
        self.clips(key).first()
    }

    pub fn hero(&self) -> Option<&VideoDescriptor> {
        self.first(HERO_KEY)
    }

    /// Everything except the hero clip, in manifest order.
    pub fn extras(&self) -> impl Iterator<Item = &VideoDescriptor> {
        let hero = self.hero();
        self.groups
            .iter()
            .flat_map(|(_, list)| list.iter())
            .filter(move |video| !hero.is_some_and(|h| std::ptr::eq(h, *video)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(key, _)| key.as_str())
    }
}

fn entry(fallback_key: Option<&str>, value: Value) -> Option<VideoDescriptor> {
    let raw = match value {
        Value::String(src) => RawVideo {
            src: Some(src),
            ..RawVideo::default()
        },
        other => match serde_json::from_value::<RawVideo>(other) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = fallback_key, %err, "dropping unreadable manifest entry");
                return None;
            }
        },
    };
    let video = VideoDescriptor::from_raw(fallback_key, raw);
    if video.is_none() {
        tracing::warn!(key = fallback_key, "dropping manifest entry without key or src");
    }
    video
}

pub fn normalize(value: Value) -> Result<VideoCatalog, FetchError> {
    let raw: RawManifest =
        serde_json::from_value(value).map_err(|err| FetchError::Malformed(err.to_string()))?;

    let mut catalog = VideoCatalog::default();
    match raw {
        RawManifest::Wrapped { videos } => {
            for value in videos {
                if let Some(video) = entry(None, value) {
                    catalog.push(video);
                }
            }
        }
        RawManifest::Flat(map) => {
            for (key, list) in map {
                let Value::Array(items) = list else {
                    tracing::warn!(%key, "manifest topic is not a list; skipped");
                    continue;
                };
                for value in items {
                    if let Some(video) = entry(Some(key.as_str()), value) {
                        catalog.push(video);
                    }
                }
            }
        }
    }
    Ok(catalog)
}

pub fn parse_manifest(body: &str) -> Result<VideoCatalog, FetchError> {
    let value: Value = serde_json::from_str(body).map_err(|err| FetchError::Malformed(err.to_string()))?;
    normalize(value)
}
