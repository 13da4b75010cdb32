use serde::{Deserialize, Serialize};

/// Verdict of a single filter for one resume/job pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub filter_name: String,
    pub passed: bool,
    pub score: f64, // 0.0 – 1.0
    pub threshold: f64,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl FilterResult {
    /// Fail-closed result used when the resume has no rendered text.
    pub fn missing_text(filter_name: &str, threshold: f64) -> Self {
        Self {
            filter_name: filter_name.to_string(),
            passed: false,
            score: 0.0,
            threshold,
            issues: vec!["No rendered resume text available".to_string()],
            suggestions: vec!["Ensure resume rendering succeeds".to_string()],
        }
    }
}
