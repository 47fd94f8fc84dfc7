//! Snapshot of `window.location` with same-origin URL resolution.

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Url::parse(href).map(|url| Self { url })
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Fragment without the leading `#` (empty when absent).
    pub fn hash(&self) -> &str {
        self.url.fragment().unwrap_or_default()
    }

    /// Resolve a possibly relative reference against this location.
    pub fn resolve(&self, reference: &str) -> Option<Url> {
        self.url.join(reference).ok()
    }

    pub fn same_origin(&self, other: &Url) -> bool {
        self.url.origin() == other.origin()
    }

    /// Same location with a new fragment, as after `history.pushState`.
    pub fn with_hash(&self, hash: &str) -> Self {
        let mut url = self.url.clone();
        match hash.trim_start_matches('#') {
            "" => url.set_fragment(None),
            fragment => url.set_fragment(Some(fragment)),
        }
        Self { url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_origin_path_and_hash() {
        let loc = Location::parse("https://forgemotionsystems.com/pl/#contact").unwrap();
        assert_eq!(loc.origin(), "https://forgemotionsystems.com");
        assert_eq!(loc.path(), "/pl/");
        assert_eq!(loc.hash(), "contact");
    }

    #[test]
    fn resolves_relative_references() {
        let loc = Location::parse("https://example.com/en/index.html").unwrap();
        assert_eq!(loc.resolve("#about").unwrap().as_str(), "https://example.com/en/index.html#about");
        assert_eq!(loc.resolve("videos/videos.json").unwrap().path(), "/en/videos/videos.json");
        let other = loc.resolve("https://elsewhere.org/#x").unwrap();
        assert!(!loc.same_origin(&other));
    }

    #[test]
    fn with_hash_replaces_fragment() {
        let loc = Location::parse("https://example.com/en/#hero").unwrap();
        assert_eq!(loc.with_hash("#about").hash(), "about");
        assert_eq!(loc.with_hash("").hash(), "");
    }
}
