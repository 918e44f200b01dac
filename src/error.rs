use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by a fetch backend
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while archiving pages and their resources
///
/// Only `Input` and `Config` abort a run; everything else is reported and
/// the archiver moves on to the next line, page or resource.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The link file could not be opened or read
    #[error("cannot read link file {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A URL in the link file or in a markup attribute did not parse
    #[error("bad url {input:?}: {source}")]
    UrlParse {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The link names a scheme the archiver does not fetch (ftp, file, ...)
    #[error("unsupported scheme {scheme:?} in {url}")]
    UnsupportedScheme { scheme: String, url: String },

    /// Network failure, timeout or unreadable body
    #[error("fetch of {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The host's robots.txt could not be retrieved
    #[error("robots.txt for {url} unavailable: {source}")]
    RobotsFetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The document could not be parsed or serialized
    #[error("markup error: {source}")]
    Markup {
        #[source]
        source: std::io::Error,
    },

    /// Creating a directory or writing a file under the archive root failed
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A string is not of the form `/<category>/<absolute url>`
    #[error("invalid archive reference {0:?}")]
    InvalidReference(String),

    /// The configuration file is missing or malformed
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ArchiveError {
    /// Whether the error should stop the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(self, ArchiveError::Input { .. } | ArchiveError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_input_and_config_are_fatal() {
        let input = ArchiveError::Input {
            path: PathBuf::from("links.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(input.is_fatal());
        assert!(ArchiveError::Config("bad".to_string()).is_fatal());

        let parse = ArchiveError::UrlParse {
            input: "::".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert!(!parse.is_fatal());
        assert!(!ArchiveError::InvalidReference("x".to_string()).is_fatal());
    }
}
