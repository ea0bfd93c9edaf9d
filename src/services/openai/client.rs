use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use super::errors::{OpenAiError, RetryError};
use super::models::{EmbeddingRequest, EmbeddingResponse};
use super::retry::{with_retry, RetryConfig};
use crate::env::apis as env_vars;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub dimensions: usize,
    pub timeout: Duration,
    pub max_retries: usize,
    pub max_concurrent_requests: usize,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(env_vars::OPENAI_API_KEY).unwrap_or_default(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 1536,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            max_concurrent_requests: 8,
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn validate(&self) -> Result<(), OpenAiError> {
        if self.api_key.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "OpenAI API key is required".to_string(),
            });
        }

        if self.base_url.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "Base URL cannot be empty".to_string(),
            });
        }

        if self.model.is_empty() {
            return Err(OpenAiError::ConfigurationError {
                message: "Model name cannot be empty".to_string(),
            });
        }

        if self.dimensions == 0 {
            return Err(OpenAiError::ConfigurationError {
                message: "Embedding dimension must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[derive(Clone)]
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
    rate_limiter: Arc<Semaphore>,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, OpenAiError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OpenAiError::ConfigurationError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        // Caps in-flight embedding calls against provider rate limits.
        let rate_limiter = Arc::new(Semaphore::new(config.max_concurrent_requests.max(1)));

        Ok(Self {
            config,
            client,
            rate_limiter,
        })
    }

    /// Embed a single text, retrying transient provider failures.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, OpenAiError> {
        let retry_config =
            RetryConfig::new(self.config.max_retries).with_total_timeout(self.config.timeout * 2);

        with_retry(retry_config, || self.embed_once(input))
            .await
            .map_err(|retry_error| match retry_error {
                RetryError::NonRetryable { source } => source,
                RetryError::MaxAttemptsExceeded => OpenAiError::RateLimitExceeded {
                    message: "Maximum retry attempts exceeded".to_string(),
                },
                RetryError::TimeoutExceeded => OpenAiError::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                },
            })
    }

    async fn embed_once(&self, input: &str) -> Result<Vec<f32>, OpenAiError> {
        let _permit =
            self.rate_limiter
                .acquire()
                .await
                .map_err(|_| OpenAiError::RateLimitExceeded {
                    message: "Rate limiter closed".to_string(),
                })?;

        let request = EmbeddingRequest::new(self.config.model.clone(), input.to_string())
            .with_dimensions(self.config.dimensions);

        let url = format!("{}/embeddings", self.config.base_url.trim_end_matches('/'));

        let response = timeout(
            self.config.timeout,
            self.client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .header("Content-Type", "application/json")
                .json(&request)
                .send(),
        )
        .await
        .map_err(|_| OpenAiError::Timeout {
            timeout_ms: self.config.timeout.as_millis() as u64,
        })?
        .map_err(OpenAiError::from_reqwest_error)?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Vec<f32>, OpenAiError> {
        let status = response.status();

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(OpenAiError::from_reqwest_error)?;

            let parsed: EmbeddingResponse = serde_json::from_str(&response_text).map_err(|e| {
                OpenAiError::ParseError {
                    message: format!("Failed to parse response: {e}"),
                }
            })?;

            parsed
                .validate()
                .map_err(|e| OpenAiError::InvalidResponse { message: e })?;

            parsed
                .into_embedding()
                .ok_or_else(|| OpenAiError::InvalidResponse {
                    message: "No embedding in response".to_string(),
                })
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            Err(OpenAiError::from_status_and_body(status, &error_body))
        }
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub async fn test_connection(&self) -> Result<(), OpenAiError> {
        self.embed_once("connection test").await?;
        Ok(())
    }
}
