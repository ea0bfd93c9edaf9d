//! Embedding provider interface and the OpenAI-backed implementation.
//!
//! The search engine only ever talks to [`EmbeddingProvider`], so the provider
//! can be swapped for a deterministic stub in tests or a different backend
//! later without touching the ranking code.

use async_trait::async_trait;
use thiserror::Error;

use super::openai::{OpenAiClient, OpenAiConfig, OpenAiError};

/// Maximum number of characters submitted to the provider per input.
///
/// Longer inputs either fail provider-side or get silently truncated there;
/// truncating locally keeps the first N characters deterministic.
pub const MAX_EMBED_CHARS: usize = 8000;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding input is empty")]
    EmptyInput,

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding provider error: {0}")]
    Provider(#[from] OpenAiError),
}

impl EmbeddingError {
    pub fn is_retryable(&self) -> bool {
        match self {
            EmbeddingError::Provider(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Converts a text string into a fixed-dimension dense vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimension of every vector this provider returns.
    fn dimensions(&self) -> usize;
}

/// [`EmbeddingProvider`] backed by the OpenAI embeddings endpoint.
pub struct OpenAiEmbeddingProvider {
    client: OpenAiClient,
}

impl OpenAiEmbeddingProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        let client = OpenAiClient::new(config)?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &OpenAiClient {
        &self.client
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let truncated = truncate_chars(text, MAX_EMBED_CHARS);
        let vector = self.client.embed(truncated).await?;

        let expected = self.client.config().dimensions;
        if vector.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.client.config().dimensions
    }
}

/// Truncate to at most `max_chars` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
