use crate::error::ArchiveError;
use crate::fetch::{FetchResponse, Fetcher};
use robotstxt::DefaultMatcher;
use std::collections::HashMap;
use url::Url;

/// Crawl-permission rules of one host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsPolicy {
    /// No usable robots.txt (4xx): everything may be fetched
    AllowAll,
    /// The host is failing (5xx): nothing may be fetched
    DisallowAll,
    /// Body of a successfully fetched robots.txt
    Rules(String),
}

impl RobotsPolicy {
    pub fn from_response(response: &FetchResponse) -> Self {
        match response.status {
            200..=299 => RobotsPolicy::Rules(String::from_utf8_lossy(&response.body).into_owned()),
            500..=599 => RobotsPolicy::DisallowAll,
            _ => RobotsPolicy::AllowAll,
        }
    }

    /// Whether `agent` may fetch `url` under this policy
    pub fn allows(&self, url: &Url, agent: &str) -> bool {
        match self {
            RobotsPolicy::AllowAll => true,
            RobotsPolicy::DisallowAll => false,
            RobotsPolicy::Rules(body) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(body, product_token(agent), url.as_str())
            }
        }
    }
}

/// Matchable part of a user agent string (`ArchiveBot1.0` -> `ArchiveBot`)
///
/// robots.txt groups are matched on the leading run of letters, `_` and `-`.
pub fn product_token(agent: &str) -> &str {
    let agent = agent.trim();
    let end = agent
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_' || c == '-'))
        .unwrap_or(agent.len());
    &agent[..end]
}

/// Location of the robots.txt governing `url`
pub fn robots_url(url: &Url) -> Result<Url, ArchiveError> {
    url.join("/robots.txt")
        .map_err(|source| ArchiveError::UrlParse {
            input: url.to_string(),
            source,
        })
}

/// Checks resources against their host's robots.txt
///
/// A robots.txt that cannot be fetched at all is an error, never an
/// implicit allow.
#[derive(Debug)]
pub struct RobotsGuard {
    agent: String,
    // keyed by origin; None means every lookup refetches
    cache: Option<HashMap<String, RobotsPolicy>>,
}

impl RobotsGuard {
    pub fn new(agent: impl Into<String>, cache: bool) -> Self {
        Self {
            agent: agent.into(),
            cache: cache.then(HashMap::new),
        }
    }

    /// Whether the configured agent may fetch `url`
    pub async fn is_allowed<F: Fetcher + ?Sized>(
        &mut self,
        fetcher: &F,
        url: &Url,
    ) -> Result<bool, ArchiveError> {
        let policy = self.policy_for(fetcher, url).await?;
        Ok(policy.allows(url, &self.agent))
    }

    async fn policy_for<F: Fetcher + ?Sized>(
        &mut self,
        fetcher: &F,
        url: &Url,
    ) -> Result<RobotsPolicy, ArchiveError> {
        let origin = url.origin().ascii_serialization();
        if let Some(policy) = self.cache.as_ref().and_then(|cache| cache.get(&origin)) {
            ::log::trace!("robots.txt cache hit for {}", origin);
            return Ok(policy.clone());
        }

        let location = robots_url(url)?;
        let response = fetcher
            .fetch(&location)
            .await
            .map_err(|e| match e {
                ArchiveError::Fetch { url, source } => ArchiveError::RobotsFetch { url, source },
                other => other,
            })?;
        let policy = RobotsPolicy::from_response(&response);
        ::log::debug!("robots.txt for {} -> {:?}", origin, response.status);

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(origin, policy.clone());
        }
        Ok(policy)
    }
}
