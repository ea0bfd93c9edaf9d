pub mod cli;
pub mod models;
pub mod services;

pub mod env;
pub mod error;
pub mod logging;

pub use error::{Result, SiteSearchError};
pub use logging::{init_logging, LoggingConfig};
pub use models::{CorpusItem, ItemId, ScoredResult};
pub use services::{
    cosine_similarity, CorpusStore, EmbeddingProvider, SearchConfig, SearchService,
};
