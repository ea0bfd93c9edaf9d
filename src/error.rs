use thiserror::Error;

use crate::services::corpus_service::CorpusFetchError;
use crate::services::embedding_service::EmbeddingError;

/// Custom error types for the sitesearch application
#[derive(Error, Debug)]
pub enum SiteSearchError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Corpus fetch error: {0}")]
    CorpusFetch(#[from] CorpusFetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },
}

impl SiteSearchError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            SiteSearchError::Embedding(e) => e.is_retryable(),
            SiteSearchError::CorpusFetch(e) => e.is_retryable(),
            SiteSearchError::Io(_) => true,
            _ => false,
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            SiteSearchError::Embedding(_) => "embedding",
            SiteSearchError::CorpusFetch(_) => "corpus_fetch",
            SiteSearchError::Io(_) => "io",
            SiteSearchError::Json(_) => "json",
            SiteSearchError::InvalidConfig { .. } => "config",
            SiteSearchError::Validation { .. } => "validation",
        }
    }
}

/// Result type alias for sitesearch
pub type Result<T> = std::result::Result<T, SiteSearchError>;
