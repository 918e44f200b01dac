use crate::config::ArchiverConfig;
use crate::error::ArchiveError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking-in-sequence fetch primitive used for pages, robots.txt and
/// resources alike
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and read the whole body
    ///
    /// Non-2xx statuses are not errors at this layer.
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, ArchiveError>;
}

/// `reqwest` backed fetcher
///
/// Certificate validation is off unless the configuration says otherwise:
/// archived sites are frequently served with expired or self-signed
/// certificates.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ArchiverConfig) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ArchiveError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, ArchiveError> {
        let fetch_err = |source: reqwest::Error| ArchiveError::Fetch {
            url: url.to_string(),
            source: Box::new(source),
        };

        ::log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_err)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(fetch_err)?.to_vec();

        ::log::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticFetcher;
    use super::*;

    #[test]
    fn test_success_range() {
        let mut response = FetchResponse {
            status: 200,
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 404;
        assert!(!response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }

    #[test]
    fn test_http_fetcher_builds_from_default_config() {
        assert!(HttpFetcher::new(&ArchiverConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_static_fetcher_records_requests() {
        let fetcher = StaticFetcher::new().with("https://example.com/", "<p>hi</p>");
        let url = Url::parse("https://example.com/").unwrap();

        let response = fetcher.fetch(&url).await.unwrap();
        assert_eq!(response.body, b"<p>hi</p>");

        let missing = Url::parse("https://example.com/missing").unwrap();
        assert!(matches!(
            fetcher.fetch(&missing).await,
            Err(ArchiveError::Fetch { .. })
        ));
        assert_eq!(fetcher.requests().len(), 2);
    }
}
