//! Environment variable constants used throughout the application
//!
//! This module centralizes all environment variable names to ensure consistency
//! and make it easier to manage configuration across the codebase.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "SITESEARCH_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "SITESEARCH_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// External API configuration
pub mod apis {
    /// OpenAI API key used for embedding generation
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
}

/// Corpus source configuration
pub mod corpus {
    /// URL of the scraped-content endpoint returning the full corpus
    pub const CORPUS_URL: &str = "SITESEARCH_CORPUS_URL";
}

/// Search engine tuning
pub mod search {
    /// Maximum concurrent embedding requests during a search
    pub const CONCURRENT: &str = "SITESEARCH_CONCURRENT";
}
