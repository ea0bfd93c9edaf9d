use serde::{Deserialize, Serialize};

use super::corpus_item::CorpusItem;

/// A corpus item paired with its cosine-similarity score for a query.
///
/// Scores are nominally in [-1, 1]; floating-point rounding may push them
/// slightly outside. Results are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub item: CorpusItem,
    pub score: f32,
}

impl ScoredResult {
    pub fn new(item: CorpusItem, score: f32) -> Self {
        Self { item, score }
    }
}
