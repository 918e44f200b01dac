use crate::error::ArchiveError;
use crate::parsers::{self, Document};
use crate::paths;
use crate::reference::ResourceDescriptor;
use std::path::{Path, PathBuf};
use url::Url;

/// One archive unit: a page and the resources discovered in it
#[derive(Debug, Clone)]
pub struct Page {
    /// Link as supplied by the caller
    pub source_link: String,

    /// URL every reference in the document is resolved against
    pub base_url: Url,

    /// Save path of the rewritten document
    pub local_html_path: PathBuf,

    /// Discovered resources in document order, duplicates kept
    pub resources: Vec<ResourceDescriptor>,

    /// Title of the page (if available)
    pub title: Option<String>,
}

impl Page {
    /// Parses `link` and derives the page's save path under `root`
    pub fn new(link: &str, root: &Path) -> Result<Self, ArchiveError> {
        let base_url = Url::parse(link).map_err(|source| ArchiveError::UrlParse {
            input: link.to_string(),
            source,
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ArchiveError::UnsupportedScheme {
                scheme: base_url.scheme().to_string(),
                url: link.to_string(),
            });
        }

        Ok(Self {
            source_link: link.to_string(),
            local_html_path: paths::page_html_path(root, &base_url),
            base_url,
            resources: Vec::new(),
            title: None,
        })
    }

    /// Rewrites every reference in `body` and returns the serialized document
    ///
    /// Replaces `resources` with what this document references and records
    /// its title.
    pub fn rewrite(&mut self, body: &[u8]) -> Result<Vec<u8>, ArchiveError> {
        let doc = Document::parse(body)?;

        let mut resources = Vec::new();
        parsers::walk(doc.root(), &self.base_url, &mut resources);
        ::log::debug!(
            "{} references {} resources",
            self.base_url,
            resources.len()
        );

        self.resources = resources;
        self.title = doc.title();
        doc.serialize()
    }
}
