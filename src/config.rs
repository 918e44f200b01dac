use crate::error::ArchiveError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the archiver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiverConfig {
    /// Top-level output directory
    #[serde(default = "default_archive_root")]
    pub archive_root: PathBuf,

    /// User agent sent on every request, robots.txt included
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request network timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate validation
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// Fetch each host's robots.txt once per run instead of once per resource
    #[serde(default = "default_true")]
    pub cache_robots: bool,
}

/// Default value for archive_root
fn default_archive_root() -> PathBuf {
    PathBuf::from("Archive")
}

/// Default value for user_agent
fn default_user_agent() -> String {
    "ArchiveBot1.0".to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for ArchiverConfig {
    fn default() -> Self {
        Self {
            archive_root: default_archive_root(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: true,
            cache_robots: true,
        }
    }
}

impl ArchiverConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref();
        let mut contents = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| ArchiveError::Config(format!("{}: {e}", path.display())))?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        serde_json::from_str(json).map_err(|e| ArchiveError::Config(e.to_string()))
    }

    pub fn with_archive_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.archive_root = root.into();
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    pub fn with_robots_cache(mut self, enabled: bool) -> Self {
        self.cache_robots = enabled;
        self
    }
}
