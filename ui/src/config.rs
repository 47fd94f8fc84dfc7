//! Options the embedding page hands to the initializers.
//!
//! Pages pass a plain JS object; the web shell serializes it to JSON and it
//! lands here. Every field is optional and defaults to the production value.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::core::lang::Lang;
use crate::modal::image::GalleryImage;

/// Per-language SEO/social metadata for one page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub author: Option<String>,
    pub canonical: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
}

/// Metadata keyed by language code (`"en"`, `"pl"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MetaData(pub HashMap<String, PageMeta>);

impl MetaData {
    /// Record for `lang`, falling back to the English record.
    pub fn for_lang(&self, lang: Lang) -> Option<&PageMeta> {
        self.0
            .get(lang.code())
            .or_else(|| self.0.get(Lang::En.code()))
    }

    pub fn insert(&mut self, lang: Lang, meta: PageMeta) {
        self.0.insert(lang.code().to_string(), meta);
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestConfig {
    pub path: String,
    /// Relative paths tried after `path`, for sites served from a sub-path.
    pub fallbacks: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: "/videos/videos.json".into(),
            fallbacks: vec!["videos/videos.json".into(), "../videos/videos.json".into()],
            timeout_ms: 7_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteOptions {
    pub meta_data: MetaData,
    /// Image lightbox markup + behavior.
    pub include_modal: bool,
    pub include_video_modal: bool,
    pub active_product_key: Option<String>,
    pub inject_other_products: bool,
    /// Named, ordered image lists for lightbox navigation.
    pub galleries: BTreeMap<String, Vec<GalleryImage>>,
    /// `None` disables video hydration entirely.
    pub video_manifest: Option<ManifestConfig>,
    pub consent: ConsentConfig,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            meta_data: MetaData::default(),
            include_modal: false,
            include_video_modal: false,
            active_product_key: None,
            inject_other_products: true,
            galleries: BTreeMap::new(),
            video_manifest: Some(ManifestConfig::default()),
            consent: ConsentConfig::default(),
        }
    }
}

impl SiteOptions {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// How the lead form authenticates against the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum AuthMode {
    /// Anonymous POST.
    Public,
    /// Bearer token + `apikey` header, read from the `content` attribute of
    /// the page element with id `element_id`.
    #[serde(rename_all = "camelCase")]
    Credential { element_id: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadFormConfig {
    pub endpoint: String,
    pub auth: AuthMode,
    pub privacy_url_en: String,
    pub privacy_url_pl: String,
}

impl Default for LeadFormConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://falhbleuwnlqllfiknrf.supabase.co/functions/v1/contact-form".into(),
            auth: AuthMode::Public,
            privacy_url_en: "https://forgemotionsystems.com/en/privacy.html".into(),
            privacy_url_pl: "https://forgemotionsystems.com/pl/privacy.html".into(),
        }
    }
}

impl LeadFormConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn privacy_url(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.privacy_url_en,
            Lang::Pl => &self.privacy_url_pl,
        }
    }
}

/// What "reject" on the cookie banner records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectPolicy {
    /// Persist "rejected"; the banner is dismissed either way.
    #[default]
    DismissOnly,
    /// The site sets no tracking cookies, so reject records "accepted".
    SameAsAccept,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsentConfig {
    pub storage_key: String,
    pub cookie_days: u32,
    pub reject_policy: RejectPolicy,
    /// Inject banner markup when the page does not provide `#cookieBanner`.
    pub inject_banner: bool,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: "fms_cookie_consent_v1".into(),
            cookie_days: 180,
            reject_policy: RejectPolicy::default(),
            inject_banner: true,
        }
    }
}

impl ConsentConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
