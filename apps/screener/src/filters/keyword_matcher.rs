//! Keyword Matcher — fast, deterministic coverage check of the job's
//! requirements inside the rendered resume text. No provider call.
//!
//! Algorithm:
//! 1. Keywords are the job's requirement phrases (deduplicated,
//!    case-insensitive); the title stands in when there are none.
//! 2. Per keyword:
//!    - whole phrase present → strength 1.0
//!    - at least half of its words present → strength 0.6
//!    - otherwise → strength 0.0
//! 3. score = mean strength; passed = score ≥ threshold

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::Filter;
use crate::models::filter_result::FilterResult;
use crate::models::job::JobPosting;
use crate::models::resume::{OptimizedResume, ResumeSource};
use crate::settings::SettingsProvider;

pub const NAME: &str = "KeywordMatcher";
pub const PRIORITY: i32 = 3;

const FULL_MATCH: f64 = 1.0;
const PARTIAL_MATCH: f64 = 0.6;
const MAX_SUGGESTED_KEYWORDS: usize = 3;

pub struct KeywordMatcher {
    settings: Arc<dyn SettingsProvider>,
}

impl KeywordMatcher {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Filter for KeywordMatcher {
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
        let threshold = self.settings.snapshot().filter_keyword_threshold;

        match resume.pdf_text.as_deref() {
            Some(text) => compute_keyword_coverage(text, job, threshold),
            None => FilterResult::missing_text(NAME, threshold),
        }
    }
}

struct KeywordHit {
    keyword: String,
    strength: f64,
}

fn compute_keyword_coverage(resume_text: &str, job: &JobPosting, threshold: f64) -> FilterResult {
    let keywords = extract_keywords(job);

    if keywords.is_empty() {
        return FilterResult {
            filter_name: NAME.to_string(),
            passed: true,
            score: 1.0,
            threshold,
            issues: vec![],
            suggestions: vec![],
        };
    }

    let resume_tokens = tokenize(resume_text);
    let resume_vocabulary: HashSet<&str> = resume_tokens.iter().map(String::as_str).collect();

    let hits: Vec<KeywordHit> = keywords
        .into_iter()
        .map(|keyword| {
            let strength = keyword_strength(&keyword, &resume_tokens, &resume_vocabulary);
            KeywordHit { keyword, strength }
        })
        .collect();

    let score = (hits.iter().map(|h| h.strength).sum::<f64>() / hits.len() as f64).clamp(0.0, 1.0);
    let passed = score >= threshold;

    debug!(
        "{NAME}: {} keywords, score={:.4}, threshold={:.2}, passed={}",
        hits.len(),
        score,
        threshold,
        passed
    );

    let issues = hits
        .iter()
        .filter(|h| h.strength == 0.0)
        .map(|h| format!("Missing job keyword: {}", h.keyword))
        .collect();

    let suggestions = if passed {
        vec![]
    } else {
        build_suggestion(&hits).into_iter().collect()
    };

    FilterResult {
        filter_name: NAME.to_string(),
        passed,
        score,
        threshold,
        issues,
        suggestions,
    }
}

/// Requirement phrases in order, deduplicated ignoring case. Falls back to
/// the title when the posting lists no requirements.
fn extract_keywords(job: &JobPosting) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords: Vec<String> = job
        .requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty() && !tokenize(r).is_empty())
        .filter(|r| seen.insert(r.to_lowercase()))
        .map(str::to_string)
        .collect();

    let title = job.title.trim();
    if keywords.is_empty() && !tokenize(title).is_empty() {
        keywords.push(title.to_string());
    }
    keywords
}

fn keyword_strength(keyword: &str, resume_tokens: &[String], vocabulary: &HashSet<&str>) -> f64 {
    let phrase = tokenize(keyword);
    if phrase.is_empty() {
        return 0.0;
    }

    if resume_tokens.windows(phrase.len()).any(|w| w == phrase.as_slice()) {
        return FULL_MATCH;
    }

    let significant: Vec<&String> = phrase.iter().filter(|t| t.chars().count() >= 2).collect();
    if significant.is_empty() {
        return 0.0;
    }
    let found = significant
        .iter()
        .filter(|t| vocabulary.contains(t.as_str()))
        .count();

    if found * 2 >= significant.len() {
        PARTIAL_MATCH
    } else {
        0.0
    }
}

/// Lowercased words; `+` and `#` stay attached so "C++" and "C#" survive.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Names the weakest keywords, missing ones first.
fn build_suggestion(hits: &[KeywordHit]) -> Option<String> {
    let mut weak: Vec<&KeywordHit> = hits.iter().filter(|h| h.strength < FULL_MATCH).collect();
    weak.sort_by(|a, b| a.strength.total_cmp(&b.strength));

    if weak.is_empty() {
        return None;
    }

    let top: Vec<&str> = weak
        .iter()
        .take(MAX_SUGGESTED_KEYWORDS)
        .map(|h| h.keyword.as_str())
        .collect();
    Some(format!(
        "Consider addressing these job keywords directly: {}.",
        top.join(", ")
    ))
}
