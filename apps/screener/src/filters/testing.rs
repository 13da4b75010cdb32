//! Test doubles for filter and orchestrator tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::Filter;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::models::filter_result::FilterResult;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};

enum StubBehavior {
    Vectors(Vec<Vec<f32>>),
    Status(u16),
}

/// Embedding provider returning canned vectors or a fixed HTTP status,
/// recording every call.
pub(crate) struct StubEmbedder {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, Vec<String>, u32)>>,
}

impl StubEmbedder {
    pub(crate) fn returning(vectors: Vec<Vec<f32>>) -> Self {
        Self::with(StubBehavior::Vectors(vectors))
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self::with(StubBehavior::Status(status))
    }

    fn with(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<(String, Vec<String>, u32)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(
        &self,
        model: &str,
        input: &[String],
        dimensions: u32,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() =
            Some((model.to_string(), input.to_vec(), dimensions));

        match &self.behavior {
            StubBehavior::Vectors(vectors) => Ok(vectors.clone()),
            StubBehavior::Status(status) => Err(EmbeddingError::Api {
                status: *status,
                message: format!("stub provider unavailable ({status})"),
            }),
        }
    }
}

/// Filter that returns a passing result after an optional delay.
#[derive(Debug)]
pub(crate) struct FixedFilter {
    name: String,
    priority: i32,
    delay: Duration,
}

impl FixedFilter {
    pub(crate) fn new(name: &str, priority: i32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            delay: Duration::ZERO,
        }
    }

    pub(crate) fn delayed(name: &str, priority: i32, delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(name, priority)
        }
    }
}

#[async_trait]
impl Filter for FixedFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn evaluate(
        &self,
        _resume: &OptimizedResume,
        _job: &JobPosting,
        _source: &ResumeSource,
    ) -> FilterResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        FilterResult {
            filter_name: self.name.clone(),
            passed: true,
            score: 1.0,
            threshold: 0.5,
            issues: vec![],
            suggestions: vec![],
        }
    }
}

pub(crate) fn backend_job() -> JobPosting {
    JobPosting {
        title: "Backend Engineer".to_string(),
        description: "Build services".to_string(),
        requirements: vec!["Go".to_string(), "Distributed systems".to_string()],
    }
}

pub(crate) fn backend_resume() -> OptimizedResume {
    OptimizedResume::with_text("Senior backend engineer, 8 years Go")
}
