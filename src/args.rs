use clap::Parser;
use page_archiver::ArchiverConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-archiver")]
#[command(about = "Archives web pages and the resources they reference for offline playback")]
#[command(version)]
pub struct Args {
    /// File with one URL per line
    pub link_file: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Archive root directory (default: Archive)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// User agent sent with every request (default: ArchiveBot1.0)
    #[arg(short, long)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Fetch robots.txt for every resource instead of once per host
    #[arg(long)]
    pub no_robots_cache: bool,

    /// Print the archive reports as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Layer command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: ArchiverConfig) -> ArchiverConfig {
        if let Some(root) = &self.root {
            config = config.with_archive_root(root);
        }
        if let Some(agent) = &self.user_agent {
            config = config.with_user_agent(agent);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if self.no_robots_cache {
            config = config.with_robots_cache(false);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "page-archiver",
            "links.txt",
            "--root",
            "out",
            "--timeout",
            "5",
            "--no-robots-cache",
        ]);
        let config = args.apply(ArchiverConfig::default());

        assert_eq!(args.link_file, PathBuf::from("links.txt"));
        assert_eq!(config.archive_root, PathBuf::from("out"));
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "ArchiveBot1.0");
        assert!(!config.cache_robots);
    }

    #[test]
    fn test_link_file_is_required() {
        assert!(Args::try_parse_from(["page-archiver"]).is_err());
    }
}
