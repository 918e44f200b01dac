use crate::materializer::Outcome;
use crate::reference::{Category, ResourceDescriptor};
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one discovered resource
#[derive(Debug, Clone, Serialize)]
pub struct ResourceReport {
    pub category: Category,

    /// Absolute URL of the resource
    pub url: String,

    /// Value written into the archived page
    pub reference: String,

    /// Where the resource lives (or would live) under the archive root
    pub local_path: PathBuf,

    pub outcome: Outcome,
}

impl ResourceReport {
    pub fn new(descriptor: &ResourceDescriptor, local_path: PathBuf, outcome: Outcome) -> Self {
        Self {
            category: descriptor.category,
            url: descriptor.absolute_url.to_string(),
            reference: descriptor.rewritten_reference(),
            local_path,
            outcome,
        }
    }
}

/// Summary of one archived page
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    /// Link as it appeared in the input
    pub link: String,

    /// Path of the rewritten document
    pub local_html_path: PathBuf,

    /// Title of the page (if available)
    pub title: Option<String>,

    /// One entry per discovered resource, in document order
    pub resources: Vec<ResourceReport>,
}

impl PageReport {
    /// Number of resources whose body was fetched and written
    pub fn saved(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Saved { .. }))
    }

    /// Number of resources that could not be archived
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.resources
            .iter()
            .filter(|resource| predicate(&resource.outcome))
            .count()
    }
}
