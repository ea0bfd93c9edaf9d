//! Optional process-lifetime cache of corpus-item embeddings.
//!
//! Keyed by item id, invalidated whenever the item's content hash changes, so
//! a re-scraped page gets re-embedded on the next search.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::models::ItemId;

#[derive(Debug, Default)]
pub struct EmbeddingCache {
    entries: Mutex<HashMap<ItemId, CacheEntry>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    content_hash: u64,
    vector: Vec<f32>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached vector if the content is unchanged.
    pub fn get(&self, id: &ItemId, content: &str) -> Option<Vec<f32>> {
        let hash = content_hash(content);
        let entries = self.entries.lock().expect("embedding cache poisoned");
        entries
            .get(id)
            .filter(|entry| entry.content_hash == hash)
            .map(|entry| entry.vector.clone())
    }

    pub fn insert(&self, id: ItemId, content: &str, vector: Vec<f32>) {
        let entry = CacheEntry {
            content_hash: content_hash(content),
            vector,
        };
        let mut entries = self.entries.lock().expect("embedding cache poisoned");
        entries.insert(id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("embedding cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
