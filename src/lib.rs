pub mod config;
pub mod error;
pub mod fetch;
pub mod links;
pub mod materializer;
pub mod page;
pub mod parsers;
pub mod paths;
pub mod reference;
pub mod resolver;
pub mod results;
pub mod robots;

// Re-export commonly used types for convenience
pub use config::ArchiverConfig;
pub use error::ArchiveError;
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use materializer::Outcome;
pub use page::Page;
pub use reference::{Category, ResourceDescriptor};
pub use results::{PageReport, ResourceReport};

use materializer::Materializer;
use robots::RobotsGuard;

/// Archives pages one after another: fetch, rewrite, save, materialize
pub struct Archiver<F: Fetcher = HttpFetcher> {
    config: ArchiverConfig,
    fetcher: F,
    robots: RobotsGuard,
}

impl Archiver<HttpFetcher> {
    /// Create an archiver fetching over HTTP(S)
    pub fn new(config: ArchiverConfig) -> Result<Self, ArchiveError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetcher> Archiver<F> {
    /// Create an archiver on top of any fetch backend
    pub fn with_fetcher(config: ArchiverConfig, fetcher: F) -> Self {
        let robots = RobotsGuard::new(config.user_agent.clone(), config.cache_robots);
        Self {
            config,
            fetcher,
            robots,
        }
    }

    /// Archive a single page and every resource it references
    ///
    /// Errors returned here concern the page itself; per-resource failures
    /// are recorded in the report.
    pub async fn archive_link(&mut self, link: &str) -> Result<PageReport, ArchiveError> {
        let mut page = Page::new(link, &self.config.archive_root)?;
        ::log::info!("Archiving {}", page.base_url);

        let response = self.fetcher.fetch(&page.base_url).await?;
        if !response.is_success() {
            ::log::warn!(
                "{} returned status {}, archiving the body anyway",
                page.base_url,
                response.status
            );
        }

        let rendered = page.rewrite(&response.body)?;
        paths::write_file(&page.local_html_path, &rendered).await?;
        ::log::info!("Saved page to {}", page.local_html_path.display());

        let resources = Materializer::new(&self.config.archive_root, &self.fetcher, &mut self.robots)
            .materialize_all(&page.resources)
            .await;

        Ok(PageReport {
            link: page.source_link,
            local_html_path: page.local_html_path,
            title: page.title,
            resources,
        })
    }

    /// Archive every link in order, logging and skipping the ones that fail
    pub async fn archive_links(&mut self, links: &[String]) -> Vec<PageReport> {
        let mut reports = Vec::with_capacity(links.len());
        let start_time = std::time::Instant::now();

        for link in links {
            match self.archive_link(link).await {
                Ok(report) => {
                    ::log::info!(
                        "Archived {}: {} resources, {} saved, {} failed",
                        link,
                        report.resources.len(),
                        report.saved(),
                        report.failed()
                    );
                    reports.push(report);
                }
                Err(e) => ::log::error!("Error archiving {}: {}", link, e),
            }
        }

        ::log::info!(
            "Archived {} of {} pages in {:.2} seconds",
            reports.len(),
            links.len(),
            start_time.elapsed().as_secs_f64()
        );
        reports
    }
}
