//! Vector Similarity — semantic fit between the rendered resume and the job
//! posting, measured as the cosine similarity of their embeddings.
//!
//! Fails closed when the resume has no rendered text and fails open when the
//! embedding provider cannot be reached: an outage must never block a resume.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::similarity::pair_score;
use super::Filter;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::models::filter_result::FilterResult;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::settings::SettingsProvider;

pub const NAME: &str = "VectorSimilarityMatcher";
pub const PRIORITY: i32 = 6;

pub struct VectorSimilarityMatcher {
    settings: Arc<dyn SettingsProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
    retry: RetryPolicy,
}

impl VectorSimilarityMatcher {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            settings,
            embedder,
            retry,
        }
    }
}

#[async_trait]
impl Filter for VectorSimilarityMatcher {
    fn name(&self) -> &str {
        NAME
    }

    fn priority(&self) -> i32 {
        PRIORITY
    }

    async fn evaluate(
        &self,
        resume: &OptimizedResume,
        job: &JobPosting,
        _source: &ResumeSource,
    ) -> FilterResult {
        // Fresh snapshot per call so threshold and model updates apply immediately
        let settings = self.settings.snapshot();
        let threshold = settings.filter_vector_threshold;

        let Some(resume_text) = resume.pdf_text.as_deref() else {
            return FilterResult::missing_text(NAME, threshold);
        };

        let input = vec![resume_text.to_string(), job.comparison_text()];
        let embedder = &self.embedder;
        let model = settings.embedding_model.as_str();
        let dimensions = settings.embedding_output_dimensionality;
        let input = &input;

        let scored = run_with_retry(&self.retry, move || embedder.embed(model, input, dimensions))
            .await
            .and_then(|vectors| pair_score(&vectors));

        match scored {
            Ok(score) => score_result(score, threshold),
            Err(e) => provider_failure(&e, threshold),
        }
    }
}

fn score_result(score: f64, threshold: f64) -> FilterResult {
    let passed = score >= threshold;
    debug!(
        "{NAME}: score={:.4}, threshold={:.2}, passed={}",
        score, threshold, passed
    );

    let mut issues = Vec::new();
    if !passed {
        issues.push(format!(
            "Low semantic vector similarity to job posting ({score:.2})"
        ));
    }

    FilterResult {
        filter_name: NAME.to_string(),
        passed,
        score,
        threshold,
        issues,
        suggestions: vec![],
    }
}

fn provider_failure(error: &EmbeddingError, threshold: f64) -> FilterResult {
    warn!("{NAME}: embedding provider failed, passing resume: {error}");
    FilterResult {
        filter_name: NAME.to_string(),
        passed: true,
        score: 1.0,
        threshold,
        issues: vec![format!("Embedding API error: {error}")],
        suggestions: vec![],
    }
}
