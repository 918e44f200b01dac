use crate::error::ArchiveError;
use url::Url;

/// Resolves a possibly relative reference against the page's base URL
///
/// Relative references inherit scheme and host from `base`; absolute ones
/// keep their own.
pub fn resolve(base: &Url, reference: &str) -> Result<Url, ArchiveError> {
    base.join(reference).map_err(|source| ArchiveError::UrlParse {
        input: reference.to_string(),
        source,
    })
}
