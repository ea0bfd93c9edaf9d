use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: String, input: String) -> Self {
        Self {
            model,
            input,
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
    pub model: Option<String>,
    pub usage: Option<EmbeddingUsage>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingData {
    pub embedding: Vec<f32>,
    pub index: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmbeddingUsage {
    pub prompt_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

impl EmbeddingResponse {
    pub fn validate(&self) -> Result<(), String> {
        if self.data.is_empty() {
            return Err("response contains no embedding data".to_string());
        }
        if self.data.iter().any(|d| d.embedding.is_empty()) {
            return Err("response contains an empty embedding vector".to_string());
        }
        Ok(())
    }

    /// The first embedding vector, if present. Single-input requests only
    /// ever produce one.
    pub fn into_embedding(mut self) -> Option<Vec<f32>> {
        self.data.sort_by_key(|entry| entry.index);
        self.data.into_iter().next().map(|entry| entry.embedding)
    }
}
