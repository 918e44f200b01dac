use crate::error::ArchiveError;
use crate::fetch::Fetcher;
use crate::paths;
use crate::reference::ResourceDescriptor;
use crate::results::ResourceReport;
use crate::robots::RobotsGuard;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Written in place of a resource its host's robots.txt forbids
pub const ROBOTS_PLACEHOLDER: &str = "<h1>This file has been protected by robots.txt</h1>";

/// Final state of one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum Outcome {
    /// Something already exists at the derived path; nothing was fetched
    AlreadyPresent,
    /// robots.txt disallows the resource; the placeholder was written
    Blocked,
    /// The body was fetched and written
    Saved { bytes: usize },
    /// Fetching or writing failed; nothing was written
    Failed { error: String },
}

/// Fetches and persists a page's resources, one at a time, in discovery
/// order
pub struct Materializer<'a, F: Fetcher + ?Sized> {
    root: &'a Path,
    fetcher: &'a F,
    robots: &'a mut RobotsGuard,
}

impl<'a, F: Fetcher + ?Sized> Materializer<'a, F> {
    pub fn new(root: &'a Path, fetcher: &'a F, robots: &'a mut RobotsGuard) -> Self {
        Self {
            root,
            fetcher,
            robots,
        }
    }

    /// Materializes every descriptor; a failure never stops the remaining ones
    pub async fn materialize_all(
        &mut self,
        resources: &[ResourceDescriptor],
    ) -> Vec<ResourceReport> {
        let mut reports = Vec::with_capacity(resources.len());

        for descriptor in resources {
            let local_path = paths::resource_path(self.root, descriptor);
            let outcome = match self.materialize(descriptor, &local_path).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    ::log::error!("Failed to archive {}: {}", descriptor.absolute_url, e);
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            reports.push(ResourceReport::new(descriptor, local_path, outcome));
        }

        reports
    }

    /// Runs one descriptor through exists -> robots -> fetch -> write
    pub async fn materialize(
        &mut self,
        descriptor: &ResourceDescriptor,
        local_path: &Path,
    ) -> Result<Outcome, ArchiveError> {
        let exists = fs::try_exists(local_path)
            .await
            .map_err(|source| ArchiveError::Write {
                path: local_path.to_path_buf(),
                source,
            })?;
        if exists {
            ::log::debug!("Already archived: {}", local_path.display());
            return Ok(Outcome::AlreadyPresent);
        }

        let url = &descriptor.absolute_url;
        if !self.robots.is_allowed(self.fetcher, url).await? {
            if !paths::write_new_file(local_path, ROBOTS_PLACEHOLDER.as_bytes()).await? {
                return Ok(Outcome::AlreadyPresent);
            }
            ::log::info!("File protected by robots.txt {}", local_path.display());
            return Ok(Outcome::Blocked);
        }

        let response = self.fetcher.fetch(url).await?;
        if !response.is_success() {
            ::log::warn!("{} returned status {}", url, response.status);
        }

        if !paths::write_new_file(local_path, &response.body).await? {
            return Ok(Outcome::AlreadyPresent);
        }
        ::log::info!(
            "Saving {} bytes to {}",
            response.body.len(),
            local_path.display()
        );
        Ok(Outcome::Saved {
            bytes: response.body.len(),
        })
    }
}
