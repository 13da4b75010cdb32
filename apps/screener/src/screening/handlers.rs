//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};
use crate::screening::{screen, ScreeningReport};
use crate::settings::{Settings, SettingsProvider};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub resume: OptimizedResume,
    pub job: JobPosting,
    #[serde(default)]
    pub source: ResumeSource,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterInfo {
    pub name: String,
    pub priority: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/filters
///
/// Registered filters in execution order.
pub async fn handle_list_filters(State(state): State<AppState>) -> Json<Vec<FilterInfo>> {
    let filters = state
        .registry
        .all()
        .iter()
        .map(|f| FilterInfo {
            name: f.name().to_string(),
            priority: f.priority(),
        })
        .collect();
    Json(filters)
}

/// POST /api/v1/screen
///
/// Runs every filter against an already rendered resume.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreeningReport>, AppError> {
    validate_job(&request.job)?;

    let report = screen(
        &state.registry,
        request.resume,
        request.job,
        request.source,
        state.screen_timeout,
    )
    .await?;

    Ok(Json(report))
}

/// POST /api/v1/screen/pdf
///
/// Multipart upload: `resume` (PDF file), `job` (JSON JobPosting), optional
/// `source`. A PDF without extractable text is screened as a resume with no
/// rendered text.
pub async fn handle_screen_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut job: Option<JobPosting> = None;
    let mut source = ResumeSource::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                pdf = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume file: {e}"))
                })?);
            }
            Some("job") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read job field: {e}")))?;
                job = Some(
                    serde_json::from_str(&text)
                        .map_err(|e| AppError::Validation(format!("Invalid job JSON: {e}")))?,
                );
            }
            Some("source") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read source field: {e}"))
                })?;
                source = ResumeSource(text);
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("Missing 'resume' file field".to_string()))?;
    let job = job.ok_or_else(|| AppError::Validation("Missing 'job' field".to_string()))?;
    validate_job(&job)?;

    let resume = extract_pdf_text(pdf)
        .await
        .map(OptimizedResume::with_text)
        .unwrap_or_default();

    let report = screen(&state.registry, resume, job, source, state.screen_timeout).await?;
    Ok(Json(report))
}

/// GET /api/v1/settings
pub async fn handle_get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.snapshot())
}

/// PUT /api/v1/settings
///
/// Replaces the live settings; the next evaluation of every filter sees them.
pub async fn handle_put_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, AppError> {
    state.settings.replace(settings)?;
    let current = state.settings.snapshot();
    info!(
        "Settings updated: vector_threshold={}, keyword_threshold={}, model={}, dimensions={}",
        current.filter_vector_threshold,
        current.filter_keyword_threshold,
        current.embedding_model,
        current.embedding_output_dimensionality
    );
    Ok(Json(current))
}

fn validate_job(job: &JobPosting) -> Result<(), AppError> {
    if job.title.trim().is_empty() && job.description.trim().is_empty() {
        return Err(AppError::Validation(
            "job must have a title or a description".to_string(),
        ));
    }
    Ok(())
}

/// Extracts text off the async runtime. Any extraction failure or an
/// image-only PDF yields `None`.
async fn extract_pdf_text(pdf: Bytes) -> Option<String> {
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf)).await;

    match extracted {
        Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
        Ok(Ok(_)) => {
            warn!("Uploaded PDF contains no extractable text");
            None
        }
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            None
        }
        Err(e) => {
            warn!("PDF extraction task failed: {e}");
            None
        }
    }
}
