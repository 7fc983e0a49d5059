//! Registry acquisition: one synchronous read from disk or over HTTP.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Where the registry comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Path(PathBuf),
    Url(String),
}

impl SpecSource {
    /// Classify `raw`; relative paths are resolved against `base_dir`.
    pub fn parse(raw: &str, base_dir: &Path) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Self::Url(raw.to_string());
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            Self::Path(path.to_path_buf())
        } else {
            Self::Path(base_dir.join(path))
        }
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to read registry {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to download registry {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("registry download {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Read the whole registry document. No retries; a failure aborts the run.
pub fn fetch_spec(source: &SpecSource) -> Result<String, FetchError> {
    let _span = tracing::info_span!("fetch_spec", %source).entered();
    let text = match source {
        SpecSource::Path(path) => {
            std::fs::read_to_string(path).map_err(|source| FetchError::Read {
                path: path.clone(),
                source,
            })?
        }
        SpecSource::Url(url) => download(url)?,
    };
    tracing::debug!(bytes = text.len(), "registry loaded");
    Ok(text)
}

fn download(url: &str) -> Result<String, FetchError> {
    let http_error = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("enumgen/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(http_error)?;
    let response = client.get(url).send().map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(http_error)
}
