pub mod client;
pub mod errors;
pub mod models;
pub mod retry;

pub use client::{OpenAiClient, OpenAiConfig};
pub use errors::{OpenAiError, RetryError};
pub use models::{EmbeddingData, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
pub use retry::{with_retry, RetryConfig};
