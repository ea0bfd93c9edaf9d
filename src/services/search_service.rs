//! Similarity search over the scraped corpus.
//!
//! Every search re-embeds the corpus (optionally through the cache), scores
//! items by cosine similarity against the query vector, and returns the top
//! results. Brute-force re-embedding is a known scaling ceiling; the embedding
//! and scoring step sits behind injected traits so a precomputed index can
//! replace it later without changing this contract.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{CorpusItem, ScoredResult};

use super::corpus_service::CorpusStore;
use super::embedding_cache::EmbeddingCache;
use super::embedding_service::{EmbeddingError, EmbeddingProvider};

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Cap on in-flight corpus-item embedding calls per search.
    pub max_concurrent_embeds: usize,
    /// Default relevance threshold used by the CLI's filtered search.
    pub min_score: f32,
    /// Keep corpus-item embeddings across searches, invalidated by content hash.
    pub cache_embeddings: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_concurrent_embeds: 8,
            min_score: 0.6,
            cache_embeddings: false,
        }
    }
}

impl SearchConfig {
    pub fn with_max_concurrent_embeds(mut self, max: usize) -> Self {
        self.max_concurrent_embeds = max;
        self
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_cache_embeddings(mut self, enabled: bool) -> Self {
        self.cache_embeddings = enabled;
        self
    }
}

pub struct SearchService {
    corpus: Arc<dyn CorpusStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    config: SearchConfig,
    cache: Option<EmbeddingCache>,
    fetch_failures: AtomicU64,
}

impl SearchService {
    pub fn new(corpus: Arc<dyn CorpusStore>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::with_config(corpus, embedder, SearchConfig::default())
    }

    pub fn with_config(
        corpus: Arc<dyn CorpusStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: SearchConfig,
    ) -> Self {
        let cache = config.cache_embeddings.then(EmbeddingCache::new);
        Self {
            corpus,
            embedder,
            config,
            cache,
            fetch_failures: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of searches that returned empty because the corpus fetch failed.
    ///
    /// Lets callers tell "corpus unavailable" apart from "no matches", which
    /// both surface as an empty result list.
    pub fn corpus_fetch_failures(&self) -> u64 {
        self.fetch_failures.load(AtomicOrdering::Relaxed)
    }

    /// Rank the corpus against `query` and return at most `limit` results,
    /// ordered by descending score. Equal scores keep corpus order.
    ///
    /// A corpus-fetch failure is recovered by returning no results; a failure
    /// to embed the query itself is fatal to the call and propagated.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<ScoredResult>> {
        // Corpus fetch and query embedding are independent of each other.
        let (corpus_res, query_res) =
            tokio::join!(self.corpus.fetch_all(), self.embedder.embed(query));

        let items = match corpus_res {
            Ok(items) => items,
            Err(e) => {
                self.fetch_failures.fetch_add(1, AtomicOrdering::Relaxed);
                warn!(error = %e, "Corpus fetch failed, returning no results");
                return Ok(Vec::new());
            }
        };

        let query_vector = query_res?;

        if items.is_empty() {
            debug!("Corpus is empty, nothing to rank");
            return Ok(Vec::new());
        }

        let concurrency = self.config.max_concurrent_embeds.max(1);

        // buffered() preserves corpus order, so the stable sort below can
        // break score ties by original position.
        let mut results: Vec<ScoredResult> = stream::iter(items)
            .map(|item| self.score_item(item, &query_vector))
            .buffered(concurrency)
            .filter_map(|scored| async move { scored })
            .collect()
            .await;

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    /// Same pipeline as [`search`](Self::search), then drops results scoring
    /// below `min_score`. May return fewer than `limit` items, possibly none.
    pub async fn search_filtered(
        &self,
        query: &str,
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<ScoredResult>> {
        let mut results = self.search(query, limit).await?;
        let unfiltered = results.len();
        results.retain(|r| r.score >= min_score);

        if results.is_empty() && unfiltered > 0 {
            debug!(
                min_score,
                unfiltered, "All results fell below the relevance threshold"
            );
        }

        Ok(results)
    }

    /// Raw corpus pass-through, no scoring. Unlike [`search`](Self::search),
    /// fetch failures propagate here since an empty list would be misleading.
    pub async fn get_all_results(&self) -> Result<Vec<CorpusItem>> {
        Ok(self.corpus.fetch_all().await?)
    }

    async fn score_item(&self, item: CorpusItem, query_vector: &[f32]) -> Option<ScoredResult> {
        match self.embed_item(&item).await {
            Ok(vector) => {
                let score = cosine_similarity(query_vector, &vector);
                Some(ScoredResult::new(item, score))
            }
            Err(e) => {
                // Partial degradation beats total failure: drop the item.
                warn!(id = %item.id, error = %e, "Skipping item whose embedding failed");
                None
            }
        }
    }

    async fn embed_item(
        &self,
        item: &CorpusItem,
    ) -> std::result::Result<Vec<f32>, EmbeddingError> {
        if let Some(cache) = &self.cache {
            if let Some(vector) = cache.get(&item.id, &item.content) {
                return Ok(vector);
            }
        }

        let vector = self.embedder.embed(&item.content).await?;

        if let Some(cache) = &self.cache {
            cache.insert(item.id.clone(), &item.content, vector.clone());
        }

        Ok(vector)
    }
}

/// Cosine of the angle between two vectors: `dot(a,b) / (||a|| * ||b||)`.
///
/// Defined as 0.0 (not NaN) when either magnitude is exactly zero, so result
/// lists stay well-formed for degenerate vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}
