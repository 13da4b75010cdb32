//! Embedding provider — the single seam through which filters obtain vectors.
//!
//! Filters depend on `Arc<dyn EmbeddingProvider>` only; the HTTP client is
//! wired in at startup and test stubs are injected the same way.

use async_trait::async_trait;
use thiserror::Error;

use crate::retry::Transient;

pub mod http;

pub use http::HttpEmbeddingProvider;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider contract violation: {0}")]
    ContractViolation(String),
}

impl Transient for EmbeddingError {
    /// Network failures, rate limits and server errors are worth another try.
    /// Everything else will fail the same way again.
    fn is_transient(&self) -> bool {
        match self {
            EmbeddingError::Http(e) => !e.is_builder() && !e.is_decode(),
            EmbeddingError::Api { status, .. } => *status == 429 || *status >= 500,
            EmbeddingError::Parse(_) | EmbeddingError::ContractViolation(_) => false,
        }
    }
}

/// Turns text into fixed-length vectors.
///
/// Returns exactly one vector per input, in submission order.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(
        &self,
        model: &str,
        input: &[String],
        dimensions: u32,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_server_errors_are_transient() {
        for status in [429, 500, 502, 503] {
            let err = EmbeddingError::Api {
                status,
                message: "busy".to_string(),
            };
            assert!(err.is_transient(), "status {status} should be transient");
        }
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        for status in [400, 401, 404, 422] {
            let err = EmbeddingError::Api {
                status,
                message: "nope".to_string(),
            };
            assert!(!err.is_transient(), "status {status} should not be transient");
        }
    }

    #[test]
    fn test_contract_violation_is_not_transient() {
        let err = EmbeddingError::ContractViolation("expected 2 vectors, got 1".to_string());
        assert!(!err.is_transient());
        assert!(err.to_string().contains("expected 2 vectors"));
    }
}
