use crate::error::ArchiveError;
use std::path::Path;

/// Reads a newline-delimited link file
///
/// Lines are trimmed and blank ones dropped; they are not validated here.
pub fn read_links<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ArchiveError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ArchiveError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_links(&contents))
}

/// Splits link file contents into non-blank, trimmed lines
pub fn parse_links(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
