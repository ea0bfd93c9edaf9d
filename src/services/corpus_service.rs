//! Corpus access: the external scraped-content endpoint behind a trait.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::CorpusItem;

#[derive(Debug, Error)]
pub enum CorpusFetchError {
    #[error("Network error fetching corpus: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    #[error("Corpus endpoint returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse corpus response: {message}")]
    Parse { message: String },

    #[error("Corpus backend reported failure: {message}")]
    Upstream { message: String },
}

impl CorpusFetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            CorpusFetchError::Network { .. } => true,
            CorpusFetchError::Http { status, .. } => *status >= 500,
            CorpusFetchError::Upstream { .. } => true,
            CorpusFetchError::Parse { .. } => false,
        }
    }
}

/// Read-only access to the full scraped corpus.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CorpusStore: Send + Sync {
    /// Fetch every item in the corpus. No pagination: the corpus is assumed
    /// small enough to rank in one pass.
    async fn fetch_all(&self) -> Result<Vec<CorpusItem>, CorpusFetchError>;
}

/// Wire envelope used by the scraper backend:
/// `{"success": true, "data": [...]}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Deserialize)]
struct CorpusEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<CorpusItem>,
    #[serde(default)]
    error: Option<String>,
}

impl CorpusEnvelope {
    fn into_items(self) -> Result<Vec<CorpusItem>, CorpusFetchError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(CorpusFetchError::Upstream {
                message: self
                    .error
                    .unwrap_or_else(|| "An unknown error occurred".to_string()),
            })
        }
    }
}

/// [`CorpusStore`] backed by an HTTP endpoint returning the envelope above.
#[derive(Clone)]
pub struct HttpCorpusStore {
    client: reqwest::Client,
    url: String,
}

impl HttpCorpusStore {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn with_client(url: String, client: reqwest::Client) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CorpusStore for HttpCorpusStore {
    async fn fetch_all(&self) -> Result<Vec<CorpusItem>, CorpusFetchError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(CorpusFetchError::Http {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let envelope: CorpusEnvelope =
            serde_json::from_str(&body).map_err(|e| CorpusFetchError::Parse {
                message: format!("Invalid corpus envelope: {e}"),
            })?;

        envelope.into_items()
    }
}
