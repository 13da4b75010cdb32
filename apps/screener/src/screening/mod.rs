//! Screening orchestration: runs every registered filter against one
//! resume/job pair and collects the verdicts. Deciding what the verdicts mean
//! for the candidate is left to the caller.

pub mod handlers;

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::filters::FilterRegistry;
use crate::models::filter_result::FilterResult;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};

/// Results of one screening run, in filter execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub source: ResumeSource,
    pub results: Vec<FilterResult>,
}

/// Evaluates all filters concurrently. When `timeout` elapses every in-flight
/// evaluation is dropped and no partial report is returned.
pub async fn screen(
    registry: &FilterRegistry,
    resume: OptimizedResume,
    job: JobPosting,
    source: ResumeSource,
    timeout: Duration,
) -> Result<ScreeningReport, AppError> {
    let run_id = Uuid::new_v4();
    let filters = registry.all();

    info!(
        %run_id,
        filters = filters.len(),
        has_text = resume.pdf_text.is_some(),
        "Starting screening run"
    );

    let evaluations = filters
        .iter()
        .map(|filter| filter.evaluate(&resume, &job, &source));

    // join_all keeps input order, so results follow registry order
    let results = tokio::time::timeout(timeout, join_all(evaluations))
        .await
        .map_err(|_| {
            AppError::Timeout(format!(
                "run {run_id} exceeded {}ms",
                timeout.as_millis()
            ))
        })?;

    let passed = results.iter().filter(|r| r.passed).count();
    info!(%run_id, passed, total = results.len(), "Screening run finished");

    Ok(ScreeningReport {
        run_id,
        evaluated_at: Utc::now(),
        source,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::testing::{backend_job, backend_resume, FixedFilter};
    use std::sync::Arc;

    fn registry(filters: Vec<FixedFilter>) -> FilterRegistry {
        let mut registry = FilterRegistry::new();
        for filter in filters {
            registry.register(Arc::new(filter)).unwrap();
        }
        registry
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_follow_priority_order_not_completion_order() {
        let registry = registry(vec![
            FixedFilter::delayed("Slow", 1, Duration::from_millis(500)),
            FixedFilter::delayed("Fast", 2, Duration::from_millis(10)),
            FixedFilter::new("Last", 9),
        ]);

        let report = screen(
            &registry,
            backend_resume(),
            backend_job(),
            ResumeSource::from("upload"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        let names: Vec<&str> = report.results.iter().map(|r| r.filter_name.as_str()).collect();
        assert_eq!(names, vec!["Slow", "Fast", "Last"]);
        assert_eq!(report.source, ResumeSource::from("upload"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_filters_run_concurrently() {
        let registry = registry(vec![
            FixedFilter::delayed("A", 1, Duration::from_secs(1)),
            FixedFilter::delayed("B", 2, Duration::from_secs(1)),
            FixedFilter::delayed("C", 3, Duration::from_secs(1)),
        ]);
        let start = tokio::time::Instant::now();

        let report = screen(
            &registry,
            backend_resume(),
            backend_job(),
            ResumeSource::default(),
            Duration::from_secs(2),
        )
        .await
        .unwrap();

        assert_eq!(report.results.len(), 3);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_no_partial_report() {
        let registry = registry(vec![
            FixedFilter::new("Quick", 1),
            FixedFilter::delayed("Stuck", 2, Duration::from_secs(600)),
        ]);

        let err = screen(
            &registry,
            backend_resume(),
            backend_job(),
            ResumeSource::default(),
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_empty_registry_yields_empty_report() {
        let report = screen(
            &FilterRegistry::new(),
            backend_resume(),
            backend_job(),
            ResumeSource::default(),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
        assert!(report.results.is_empty());
    }
}
