/// Data sources for the record store.
///
/// The dashboard reads one CSV document per session. It normally lives at a
/// public URL; a local path or inline text is accepted for offline use and
/// tests.

use crate::error::LoadError;
use std::fmt;
use std::path::PathBuf;

/// Published salary dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/vqrca/dashboard_salarios_dados/refs/heads/main/dados-imersao-final.csv";

/// Where the CSV text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
    Inline(String),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_SOURCE_URL.to_string())
    }
}

impl DataSource {
    /// Interprets `http://` and `https://` locations as URLs and everything
    /// else as a filesystem path.
    ///
    /// ```
    /// use salarydash::DataSource;
    ///
    /// assert!(matches!(DataSource::parse("https://example.com/a.csv"), DataSource::Url(_)));
    /// assert!(matches!(DataSource::parse("data/salaries.csv"), DataSource::Path(_)));
    /// ```
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Reads the whole document. Attempted once; there is no retry.
    pub fn fetch(&self) -> Result<String, LoadError> {
        match self {
            DataSource::Url(url) => fetch_url(url),
            DataSource::Path(path) => std::fs::read_to_string(path).map_err(|e| LoadError::Unreachable {
                source_name: self.to_string(),
                reason: e.to_string(),
            }),
            DataSource::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Inline(_) => f.write_str("<inline>"),
        }
    }
}

fn fetch_url(url: &str) -> Result<String, LoadError> {
    let unreachable = |reason: String| LoadError::Unreachable {
        source_name: url.to_string(),
        reason,
    };

    let response = reqwest::blocking::Client::new()
        .get(url)
        .send()
        .map_err(|e| unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(unreachable(format!("HTTP status {}", status)));
    }

    response.text().map_err(|e| unreachable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_locations() {
        assert_eq!(
            DataSource::parse(" HTTPS://host/x.csv "),
            DataSource::Url("HTTPS://host/x.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("/tmp/x.csv"),
            DataSource::Path(PathBuf::from("/tmp/x.csv"))
        );
        assert_eq!(DataSource::default(), DataSource::Url(DEFAULT_SOURCE_URL.to_string()));
    }

    #[test]
    fn test_fetch_inline_and_file() {
        let inline = DataSource::Inline("a,b\n1,2\n".to_string());
        assert_eq!(inline.fetch().unwrap(), "a,b\n1,2\n");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ano,usd\n2023,1\n").unwrap();
        let from_file = DataSource::Path(file.path().to_path_buf());
        assert_eq!(from_file.fetch().unwrap(), "ano,usd\n2023,1\n");
    }

    #[test]
    fn test_fetch_missing_file_is_unreachable() {
        let source = DataSource::Path(PathBuf::from("/definitely/not/here.csv"));
        match source.fetch() {
            Err(LoadError::Unreachable { source_name, .. }) => {
                assert_eq!(source_name, "/definitely/not/here.csv");
            }
            other => panic!("expected Unreachable, got {:?}", other),
        }
    }
}
