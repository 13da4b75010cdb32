//! Client for OpenAI-compatible `/embeddings` endpoints.
//!
//! One request per call. Retries are not done here; callers wrap `embed` in
//! [`crate::retry::run_with_retry`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{EmbeddingError, EmbeddingProvider};

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    dimensions: u32,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpEmbeddingProvider {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpEmbeddingProvider {
    pub fn new(url: String, api_key: String, timeout: Duration) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(
        &self,
        model: &str,
        input: &[String],
        dimensions: u32,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model,
            input,
            dimensions,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Embedding API returned {}: {}", status, body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let vectors = parse_embeddings(&body, input.len())?;

        debug!(
            "Embedding call succeeded: model={}, inputs={}, dimensions={}",
            model,
            vectors.len(),
            vectors.first().map(Vec::len).unwrap_or_default()
        );

        Ok(vectors)
    }
}

/// Extracts the provider's error message, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Parses a response body into vectors ordered by their `index` field.
fn parse_embeddings(body: &str, expected: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    let mut response: EmbeddingResponse = serde_json::from_str(body)?;

    if response.data.len() != expected {
        return Err(EmbeddingError::ContractViolation(format!(
            "expected {expected} embeddings, got {}",
            response.data.len()
        )));
    }

    response.data.sort_by_key(|d| d.index);
    if response.data.iter().enumerate().any(|(i, d)| d.index != i) {
        return Err(EmbeddingError::ContractViolation(
            "embedding indices are not a permutation of the inputs".to_string(),
        ));
    }

    Ok(response.data.into_iter().map(|d| d.embedding).collect())
}
