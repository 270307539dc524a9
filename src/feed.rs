use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::catalog::CatalogSnapshot;

/// Where a catalog snapshot comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Two-stage fetch: the pointer url's text body names the payload url.
    Pointer(String),
    /// Local JSON payload, for offline builds and tests.
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("fetching pointer file: {0}")]
    Pointer(#[source] reqwest::Error),
    #[error("pointer file is empty")]
    EmptyPointer,
    #[error("fetching catalog payload: {0}")]
    Payload(#[source] reqwest::Error),
    #[error("parsing catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client for the pointer-then-payload feed protocol.
///
/// The pointer file is a one-line text document whose body is the payload
/// url; publishing a new payload and then updating the pointer lets the feed
/// swap atomically without clients racing a half-written payload.
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("gh-market/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { http }
    }

    /// Load a snapshot from `source`.
    pub async fn load(&self, source: &DataSource) -> Result<CatalogSnapshot, FeedError> {
        match source {
            DataSource::Pointer(url) => self.fetch(url).await,
            DataSource::File(path) => load_file(path),
        }
    }

    async fn fetch(&self, pointer_url: &str) -> Result<CatalogSnapshot, FeedError> {
        tracing::debug!("fetching pointer {pointer_url}");
        let body = self
            .http
            .get(pointer_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(FeedError::Pointer)?
            .text()
            .await
            .map_err(FeedError::Pointer)?;

        let payload_url = body.trim();
        if payload_url.is_empty() {
            return Err(FeedError::EmptyPointer);
        }

        tracing::debug!("fetching payload {payload_url}");
        let payload = self
            .http
            .get(payload_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(FeedError::Payload)?
            .text()
            .await
            .map_err(FeedError::Payload)?;

        Ok(serde_json::from_str(&payload)?)
    }
}

fn load_file(path: &Path) -> Result<CatalogSnapshot, FeedError> {
    let text = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
