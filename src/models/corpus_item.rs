use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a corpus item. The scraper backend uses integer ids today,
/// but string ids also appear in exported data sets, so both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{id}"),
            ItemId::Str(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Str(id.to_string())
    }
}

/// A scraped document as returned by the corpus endpoint.
///
/// Items are immutable once fetched; the search engine only ever holds a
/// request-scoped copy and never writes back to the corpus store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusItem {
    pub id: ItemId,
    pub url: String,
    pub content: String,
    pub last_scraped: DateTime<Utc>,
}

impl CorpusItem {
    pub fn new<I: Into<ItemId>>(
        id: I,
        url: String,
        content: String,
        last_scraped: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            url,
            content,
            last_scraped,
        }
    }

    /// A short preview of the content, suitable for log lines and CLI output.
    pub fn content_preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            self.content.clone()
        } else {
            let truncated: String = self.content.chars().take(max_chars).collect();
            format!("{truncated}...")
        }
    }
}
