use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use sitesearch::services::corpus_service::{CorpusFetchError, CorpusStore};
use sitesearch::services::embedding_service::{EmbeddingError, EmbeddingProvider};
use sitesearch::services::openai::OpenAiError;
use sitesearch::{CorpusItem, SearchService, SiteSearchError};

/// Corpus stub that can be flipped into a failing state.
struct FlakyCorpus {
    items: Vec<CorpusItem>,
    failing: AtomicBool,
}

impl FlakyCorpus {
    fn new(items: Vec<CorpusItem>) -> Self {
        Self {
            items,
            failing: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl CorpusStore for FlakyCorpus {
    async fn fetch_all(&self) -> Result<Vec<CorpusItem>, CorpusFetchError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(CorpusFetchError::Upstream {
                message: "scraper backend offline".to_string(),
            })
        } else {
            Ok(self.items.clone())
        }
    }
}

/// Embedder that fails for inputs containing a marker substring.
struct FailingEmbedder {
    fail_on: Option<String>,
    calls: AtomicUsize,
}

impl FailingEmbedder {
    fn fail_on(marker: &str) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn always_failing() -> Self {
        Self {
            fail_on: Some(String::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.fail_on {
            if text.contains(marker.as_str()) {
                return Err(EmbeddingError::Provider(OpenAiError::ServiceUnavailable {
                    message: "provider down".to_string(),
                }));
            }
        }
        Ok(vec![1.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        2
    }
}

fn item(id: i64, content: &str) -> CorpusItem {
    CorpusItem::new(id, format!("u{id}"), content.to_string(), Utc::now())
}

#[tokio::test]
async fn test_corpus_fetch_failure_fails_soft() {
    let corpus = Arc::new(FlakyCorpus::new(vec![item(1, "doc")]));
    corpus.set_failing(true);

    let service = SearchService::new(
        corpus.clone(),
        Arc::new(FailingEmbedder::fail_on("never-matches")),
    );

    let results = service.search("anything", 3).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(service.corpus_fetch_failures(), 1);

    // Recovery: once the backend is healthy again, results come back.
    corpus.set_failing(false);
    let results = service.search("anything", 3).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(service.corpus_fetch_failures(), 1);
}

#[tokio::test]
async fn test_empty_after_filter_is_distinct_from_fetch_failure() {
    let corpus = Arc::new(FlakyCorpus::new(vec![item(1, "doc")]));
    let service = SearchService::new(
        corpus.clone(),
        Arc::new(FailingEmbedder::fail_on("never-matches")),
    );

    // Everything scores 1.0 with this stub, so an impossible threshold
    // filters the whole list out.
    let results = service.search_filtered("anything", 3, 2.0).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(service.corpus_fetch_failures(), 0);

    corpus.set_failing(true);
    let results = service.search("anything", 3).await.unwrap();
    assert!(results.is_empty());
    assert_eq!(service.corpus_fetch_failures(), 1);
}

#[tokio::test]
async fn test_query_embedding_failure_is_fatal_and_typed() {
    let corpus = Arc::new(FlakyCorpus::new(vec![item(1, "doc")]));
    let service = SearchService::new(corpus, Arc::new(FailingEmbedder::always_failing()));

    let err = service.search("anything", 3).await.unwrap_err();
    match err {
        SiteSearchError::Embedding(EmbeddingError::Provider(_)) => (),
        other => panic!("Expected embedding provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_bad_item_degrades_partially() {
    let corpus = Arc::new(FlakyCorpus::new(vec![
        item(1, "healthy document"),
        item(2, "poisoned document"),
        item(3, "another healthy document"),
    ]));
    let service = SearchService::new(corpus, Arc::new(FailingEmbedder::fail_on("poisoned")));

    let results = service.search("query", 5).await.unwrap();

    let ids: Vec<String> = results.iter().map(|r| r.item.id.to_string()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn test_get_all_results_propagates_fetch_error() {
    let corpus = Arc::new(FlakyCorpus::new(vec![item(1, "doc")]));
    corpus.set_failing(true);

    let service = SearchService::new(
        corpus,
        Arc::new(FailingEmbedder::fail_on("never-matches")),
    );

    let err = service.get_all_results().await.unwrap_err();
    assert!(matches!(err, SiteSearchError::CorpusFetch(_)));
    assert_eq!(err.category(), "corpus_fetch");
}
