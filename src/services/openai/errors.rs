use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Network error: {source}")]
    NetworkError { source: reqwest::Error },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl OpenAiError {
    pub fn is_retryable(&self) -> bool {
        match self {
            OpenAiError::RateLimitExceeded { .. } => true,
            OpenAiError::Timeout { .. } => true,
            OpenAiError::NetworkError { .. } => true,
            OpenAiError::ServerError { status, .. } => *status >= 500,
            OpenAiError::ServiceUnavailable { .. } => true,
            _ => false,
        }
    }

    pub fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            OpenAiError::RateLimitExceeded { .. } => Some(20),
            OpenAiError::Timeout { .. } => Some(5),
            OpenAiError::ServerError { .. } => Some(30),
            OpenAiError::ServiceUnavailable { .. } => Some(60),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            OpenAiError::AuthenticationFailed { .. } => {
                "OpenAI API authentication failed. Please check your API key.".to_string()
            }
            OpenAiError::RateLimitExceeded { .. } => {
                "OpenAI API rate limit exceeded. Please wait a moment and try again.".to_string()
            }
            OpenAiError::Timeout { .. } => {
                "Embedding request timed out. Please try again.".to_string()
            }
            OpenAiError::NetworkError { .. } => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            OpenAiError::QuotaExceeded { .. } => {
                "API quota exceeded. Please check your OpenAI usage limits.".to_string()
            }
            OpenAiError::ServerError { .. } => {
                "OpenAI service is experiencing issues. Please try again later.".to_string()
            }
            OpenAiError::ServiceUnavailable { .. } => {
                "OpenAI service is temporarily unavailable. Please try again later.".to_string()
            }
            OpenAiError::InvalidRequest { message } => {
                format!("Invalid request: {message}")
            }
            OpenAiError::ParseError { .. } => {
                "Error parsing OpenAI response. Please try again.".to_string()
            }
            OpenAiError::InvalidResponse { .. } => {
                "Received invalid response from OpenAI. Please try again.".to_string()
            }
            OpenAiError::ConfigurationError { message } => {
                format!("Configuration error: {message}")
            }
        }
    }

    pub fn from_reqwest_error(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            OpenAiError::Timeout { timeout_ms: 30000 }
        } else if error.is_connect() {
            OpenAiError::NetworkError { source: error }
        } else if let Some(status) = error.status() {
            let status_code = status.as_u16();
            let message = error.to_string();

            match status_code {
                401 => OpenAiError::AuthenticationFailed { message },
                403 => OpenAiError::QuotaExceeded { message },
                429 => OpenAiError::RateLimitExceeded { message },
                500..=599 => OpenAiError::ServerError {
                    status: status_code,
                    message,
                },
                _ => OpenAiError::InvalidRequest { message },
            }
        } else {
            OpenAiError::NetworkError { source: error }
        }
    }

    pub fn from_status_and_body(status: reqwest::StatusCode, body: &str) -> Self {
        let status_code = status.as_u16();

        // OpenAI error bodies look like {"error": {"message": "...", ...}}
        let error_message =
            if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(body) {
                error_response
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or(body)
                    .to_string()
            } else {
                body.to_string()
            };

        match status_code {
            400 => OpenAiError::InvalidRequest {
                message: error_message,
            },
            401 => OpenAiError::AuthenticationFailed {
                message: error_message,
            },
            403 => {
                if error_message.to_lowercase().contains("quota") {
                    OpenAiError::QuotaExceeded {
                        message: error_message,
                    }
                } else {
                    OpenAiError::AuthenticationFailed {
                        message: error_message,
                    }
                }
            }
            429 => OpenAiError::RateLimitExceeded {
                message: error_message,
            },
            503 => OpenAiError::ServiceUnavailable {
                message: error_message,
            },
            500..=599 => OpenAiError::ServerError {
                status: status_code,
                message: error_message,
            },
            _ => OpenAiError::InvalidRequest {
                message: format!("HTTP {status_code}: {error_message}"),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum RetryError {
    #[error("Maximum retry attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Retry timeout exceeded")]
    TimeoutExceeded,

    #[error("Non-retryable error: {source}")]
    NonRetryable { source: OpenAiError },
}

impl From<OpenAiError> for RetryError {
    fn from(error: OpenAiError) -> Self {
        if error.is_retryable() {
            RetryError::MaxAttemptsExceeded
        } else {
            RetryError::NonRetryable { source: error }
        }
    }
}
