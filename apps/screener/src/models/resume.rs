use serde::{Deserialize, Serialize};

/// A rendered resume. `pdf_text` is `None` when rendering or text extraction
/// failed upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizedResume {
    #[serde(default)]
    pub pdf_text: Option<String>,
}

impl OptimizedResume {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            pdf_text: Some(text.into()),
        }
    }
}

/// Provenance tag of the resume. Filters pass it through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeSource(pub String);

impl Default for ResumeSource {
    fn default() -> Self {
        Self("unknown".to_string())
    }
}

impl From<&str> for ResumeSource {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
