pub mod corpus_item;
pub mod scored_result;

pub use corpus_item::{CorpusItem, ItemId};
pub use scored_result::ScoredResult;
