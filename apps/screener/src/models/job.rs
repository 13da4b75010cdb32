use serde::{Deserialize, Serialize};

/// A job posting as handed over by the ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl JobPosting {
    /// Title, description and requirements joined by single spaces.
    pub fn comparison_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.description,
            self.requirements.join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_text_joins_all_parts() {
        let job = JobPosting {
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            requirements: vec!["Go".to_string(), "Distributed systems".to_string()],
        };
        assert_eq!(
            job.comparison_text(),
            "Backend Engineer Build services Go Distributed systems"
        );
    }

    #[test]
    fn test_requirements_default_to_empty() {
        let job: JobPosting =
            serde_json::from_str(r#"{"title": "SRE", "description": "Keep it up"}"#).unwrap();
        assert!(job.requirements.is_empty());
        assert_eq!(job.comparison_text(), "SRE Keep it up ");
    }
}
