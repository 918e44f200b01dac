use crate::error::ArchiveError;
use crate::reference::ResourceDescriptor;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::{Position, Url};

/// Directory under the archive root holding rewritten pages
pub const HTML_DIR: &str = "html";

/// Save path for a page's rewritten document: `<root>/html/<host><path>`
///
/// An empty or root path becomes `index.html`; a trailing slash is dropped.
pub fn page_html_path(root: &Path, url: &Url) -> PathBuf {
    let path = match url.path() {
        "" | "/" => "/index.html",
        path => path,
    };
    archive_path(root, HTML_DIR, url, path)
}

/// Save path for a resource: `<root>/<category>/<host><path>`
///
/// Unlike pages, an empty path is left alone and maps to the bare host
/// directory.
pub fn resource_path(root: &Path, descriptor: &ResourceDescriptor) -> PathBuf {
    let url = &descriptor.absolute_url;
    archive_path(root, descriptor.category.as_str(), url, url.path())
}

fn archive_path(root: &Path, dir: &str, url: &Url, path: &str) -> PathBuf {
    // host plus any non-default port, without userinfo
    let host = &url[Position::BeforeHost..Position::AfterPort];

    let mut out = root.join(dir);
    if !host.is_empty() {
        out.push(host);
    }
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        out.push(segment);
    }
    out
}

/// Creates the parent directories of `path`
pub async fn ensure_parent(path: &Path) -> Result<(), ArchiveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| ArchiveError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    Ok(())
}

/// Writes `bytes` to `path`, replacing whatever is there
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ArchiveError> {
    ensure_parent(path).await?;
    fs::write(path, bytes)
        .await
        .map_err(|source| ArchiveError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `bytes` to `path` only if nothing exists there yet
///
/// Returns `false` without touching the file when the path is taken.
pub async fn write_new_file(path: &Path, bytes: &[u8]) -> Result<bool, ArchiveError> {
    ensure_parent(path).await?;
    let write_err = |source: std::io::Error| ArchiveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(bytes).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Category;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_page_path_index_substitution() {
        let root = Path::new("Archive");
        assert_eq!(
            page_html_path(root, &url("https://example.com")),
            PathBuf::from("Archive/html/example.com/index.html")
        );
        assert_eq!(
            page_html_path(root, &url("https://example.com/")),
            PathBuf::from("Archive/html/example.com/index.html")
        );
    }

    #[test]
    fn test_page_path_strips_trailing_slash() {
        let root = Path::new("Archive");
        assert_eq!(
            page_html_path(root, &url("https://blog.example.com/2020/05/post/")),
            PathBuf::from("Archive/html/blog.example.com/2020/05/post")
        );
        assert_eq!(
            page_html_path(root, &url("http://example.com:8080/about.html?x=1")),
            PathBuf::from("Archive/html/example.com:8080/about.html")
        );
    }

    #[test]
    fn test_resource_path_drops_scheme() {
        let d = ResourceDescriptor::new(Category::Image, url("https://example.com/logo.png"));
        assert_eq!(
            resource_path(Path::new("Archive"), &d),
            PathBuf::from("Archive/image/example.com/logo.png")
        );
    }

    #[test]
    fn test_resource_with_empty_path_maps_to_host_dir() {
        let d = ResourceDescriptor::new(Category::PageLink, url("https://example.com/"));
        assert_eq!(
            resource_path(Path::new("Archive"), &d),
            PathBuf::from("Archive/page-link/example.com")
        );
    }

    #[test]
    fn test_resource_path_ignores_userinfo_and_query() {
        let d = ResourceDescriptor::new(
            Category::Script,
            url("https://user:pw@cdn.example.org/js/app.js?v=3#top"),
        );
        assert_eq!(
            resource_path(Path::new("/tmp/a"), &d),
            PathBuf::from("/tmp/a/script/cdn.example.org/js/app.js")
        );
    }

    #[test]
    fn test_resource_path_is_pure() {
        let d = ResourceDescriptor::new(
            Category::GenericResource,
            url("https://example.com/css/site.css"),
        );
        let other = ResourceDescriptor::new(Category::Image, url("https://other.org/x.png"));
        let root = Path::new("Archive");

        let first = resource_path(root, &d);
        let _ = resource_path(root, &other);
        assert_eq!(resource_path(root, &d), first);
    }

    #[tokio::test]
    async fn test_write_new_file_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image/example.com/logo.png");

        assert!(write_new_file(&path, b"first").await.unwrap());
        assert!(!write_new_file(&path, b"second").await.unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }
}
