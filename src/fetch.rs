//! Image retrieval
//!
//! Section composers need the bytes of every referenced image before they can place it.
//! [`ImageFetcher`] is the seam. [`HttpImageFetcher`] serves references taken from request
//! payloads and only ever talks HTTP; [`LocalAssetLoader`] reads operator-configured assets
//! such as the final report separator from disk.

use async_trait::async_trait;
use std::path::Path;

use crate::config::FetchConfig;
use crate::error::{Error, Result};

/// Trait for turning an image reference into bytes
///
/// Callers do not retry: a failed fetch aborts the document being generated.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Retrieve the image at `reference`
    ///
    /// `label` names the image in logs and errors (e.g. `evento-7-cronograma`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageFetch`] if the reference is unreachable, answers with a
    /// non-success status, or cannot be read.
    async fn fetch(&self, reference: &str, label: &str) -> Result<Vec<u8>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Fetches `http(s)://` references with `reqwest`
///
/// Any other reference (plain path, `file://`, other schemes) is refused with
/// [`Error::ImageFetch`] without touching the filesystem.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Build a fetcher with the configured timeout and user agent
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: &str, label: &str) -> Result<Vec<u8>> {
        let fetch_error = |reason: String| Error::ImageFetch {
            reference: url.to_string(),
            label: label.to_string(),
            reason,
        };

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                fetch_error("request timed out".to_string())
            } else if e.is_connect() {
                fetch_error(format!("connection failed: {e}"))
            } else {
                fetch_error(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, reference: &str, label: &str) -> Result<Vec<u8>> {
        let result = if is_remote(reference) {
            self.fetch_remote(reference, label).await
        } else {
            Err(Error::ImageFetch {
                reference: reference.to_string(),
                label: label.to_string(),
                reason: "only http(s) image references are accepted".to_string(),
            })
        };

        log_outcome(reference, label, &result);
        result
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Reads images from the local filesystem
///
/// Accepts plain paths and `file://` URLs. Only configuration values are routed here,
/// never references from a request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAssetLoader;

#[async_trait]
impl ImageFetcher for LocalAssetLoader {
    async fn fetch(&self, reference: &str, label: &str) -> Result<Vec<u8>> {
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        let result = tokio::fs::read(Path::new(path))
            .await
            .map_err(|e| Error::ImageFetch {
                reference: reference.to_string(),
                label: label.to_string(),
                reason: e.to_string(),
            });

        log_outcome(reference, label, &result);
        result
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

fn log_outcome(reference: &str, label: &str, result: &Result<Vec<u8>>) {
    match result {
        Ok(bytes) => {
            tracing::debug!(reference, label, bytes = bytes.len(), "image fetched");
        }
        Err(e) => {
            tracing::warn!(reference, label, error = %e, "image fetch failed");
        }
    }
}

/// Whether `reference` is an `http://` or `https://` URL
pub fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
