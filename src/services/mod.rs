pub mod corpus_service;
pub mod embedding_cache;
pub mod embedding_service;
pub mod openai;
pub mod search_service;

pub use corpus_service::{CorpusFetchError, CorpusStore, HttpCorpusStore};
pub use embedding_cache::EmbeddingCache;
pub use embedding_service::{
    EmbeddingError, EmbeddingProvider, OpenAiEmbeddingProvider, MAX_EMBED_CHARS,
};
pub use search_service::{cosine_similarity, SearchConfig, SearchService};
