use crate::error::ArchiveError;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use url::Url;

/// Archive-local class of a discovered reference
///
/// The category is the first path segment of a rewritten reference and the
/// first directory under the archive root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// `<a href>` targets
    PageLink,
    /// `<img src>` targets
    Image,
    /// `<script src>` targets
    Script,
    /// Everything else the rewriter knows about (stylesheets, media, frames)
    GenericResource,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::PageLink,
        Category::Image,
        Category::Script,
        Category::GenericResource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PageLink => "page-link",
            Category::Image => "image",
            Category::Script => "script",
            Category::GenericResource => "generic-resource",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ArchiveError::InvalidReference(s.to_string()))
    }
}

/// One discovered reference, pending materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub category: Category,
    pub absolute_url: Url,
}

impl ResourceDescriptor {
    pub fn new(category: Category, absolute_url: Url) -> Self {
        Self {
            category,
            absolute_url,
        }
    }

    /// Encodes the descriptor as `/<category>/<absolute url>`, the value
    /// written back into the markup attribute
    pub fn rewritten_reference(&self) -> String {
        format!("/{}/{}", self.category, self.absolute_url)
    }

    /// Inverse of [`rewritten_reference`](Self::rewritten_reference)
    pub fn decode(reference: &str) -> Result<Self, ArchiveError> {
        let invalid = || ArchiveError::InvalidReference(reference.to_string());

        let (category, url) = reference
            .strip_prefix('/')
            .and_then(|rest| rest.split_once('/'))
            .ok_or_else(invalid)?;
        let category = category.parse::<Category>().map_err(|_| invalid())?;
        let absolute_url = Url::parse(url).map_err(|_| invalid())?;

        Ok(Self::new(category, absolute_url))
    }

    /// Whether the target looks like an HTML document (`.htm`, `.html`,
    /// `.shtml`, ...)
    pub fn is_html_document(&self) -> bool {
        Path::new(self.absolute_url.path())
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.to_ascii_lowercase().contains("htm"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(category: Category, url: &str) -> ResourceDescriptor {
        ResourceDescriptor::new(category, Url::parse(url).unwrap())
    }

    #[test]
    fn test_rewritten_reference_keeps_scheme() {
        let d = descriptor(Category::Image, "https://example.com/logo.png");
        assert_eq!(d.rewritten_reference(), "/image/https://example.com/logo.png");
    }

    #[test]
    fn test_decode_recovers_fields() {
        let d = ResourceDescriptor::decode(
            "/generic-resource/http://cdn.example.org:8080/css/site.css?v=2",
        )
        .unwrap();
        assert_eq!(d.category, Category::GenericResource);
        assert_eq!(d.absolute_url.host_str(), Some("cdn.example.org"));
        assert_eq!(d.absolute_url.port(), Some(8080));
        assert_eq!(d.absolute_url.path(), "/css/site.css");
    }

    #[test]
    fn test_decode_rejects_malformed_references() {
        for bad in [
            "image/https://example.com/a.png",
            "/image",
            "/video/https://example.com/a.mp4",
            "/image/not a url",
        ] {
            assert!(
                matches!(
                    ResourceDescriptor::decode(bad),
                    Err(ArchiveError::InvalidReference(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_html_document_detection() {
        assert!(descriptor(Category::PageLink, "https://e.com/page.html").is_html_document());
        assert!(descriptor(Category::PageLink, "https://e.com/old.HTM").is_html_document());
        assert!(descriptor(Category::PageLink, "https://e.com/ssi.shtml").is_html_document());
        assert!(!descriptor(Category::PageLink, "https://e.com/file.pdf").is_html_document());
        assert!(!descriptor(Category::PageLink, "https://e.com/dir/").is_html_document());
        assert!(!descriptor(Category::PageLink, "https://e.com/?p=x.html").is_html_document());
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }
}
