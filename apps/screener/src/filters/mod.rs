//! Screening filters — pluggable, trait-based checks of one resume against one job.
//!
//! Every filter is registered explicitly in [`register_builtin`]; the
//! orchestrator only ever sees `Arc<dyn Filter>` handles from the registry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::models::filter_result::FilterResult;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};
use crate::retry::RetryPolicy;
use crate::settings::SettingsProvider;

pub mod keyword_matcher;
pub mod registry;
pub mod similarity;
pub mod vector_similarity;

#[cfg(test)]
pub(crate) mod testing;

pub use keyword_matcher::KeywordMatcher;
pub use registry::{FilterRegistry, RegistryError};
pub use vector_similarity::VectorSimilarityMatcher;

/// The filter trait. Implement this and add the filter to [`register_builtin`]
/// to have it run on every screening request.
///
/// `evaluate` must not fail: missing input and provider outages are reported
/// through the returned `FilterResult`. Implementations keep no mutable state
/// between calls, so one instance serves concurrent evaluations.
#[async_trait]
pub trait Filter: Send + Sync {
    /// Stable identity used in results and for duplicate detection.
    fn name(&self) -> &str;

    /// Execution order; lower runs first.
    fn priority(&self) -> i32;

    async fn evaluate(
        &self,
        resume: &OptimizedResume,
        job: &JobPosting,
        source: &ResumeSource,
    ) -> FilterResult;
}

/// Registers every built-in filter. Called once at startup.
pub fn register_builtin(
    registry: &mut FilterRegistry,
    settings: Arc<dyn SettingsProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    retry: RetryPolicy,
) -> Result<(), RegistryError> {
    registry.register(Arc::new(KeywordMatcher::new(settings.clone())))?;
    registry.register(Arc::new(VectorSimilarityMatcher::new(
        settings, embedder, retry,
    )))?;
    Ok(())
}
