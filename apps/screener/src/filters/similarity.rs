//! Vector math shared by embedding-based filters.

use crate::embedding::EmbeddingError;

/// Cosine similarity in [-1, 1]. Returns 0.0 when either vector has zero norm.
/// Accumulates in f64; callers validate that lengths match.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|y| f64::from(*y).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}

/// Maps a cosine similarity from [-1, 1] onto [0, 1].
pub fn normalize_similarity(similarity: f64) -> f64 {
    ((similarity + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Scores the `[resume, job]` pair returned by a provider.
///
/// A wrong vector count, mismatched or empty vectors and non-finite values
/// are provider contract violations. The length is not checked against the
/// requested dimensionality: providers that ignore `dimensions` still score.
pub fn pair_score(vectors: &[Vec<f32>]) -> Result<f64, EmbeddingError> {
    let [resume, job] = vectors else {
        return Err(EmbeddingError::ContractViolation(format!(
            "expected 2 embeddings, got {}",
            vectors.len()
        )));
    };

    if resume.is_empty() || resume.len() != job.len() {
        return Err(EmbeddingError::ContractViolation(format!(
            "embedding lengths differ or are empty ({} vs {})",
            resume.len(),
            job.len()
        )));
    }

    if resume.iter().chain(job.iter()).any(|v| !v.is_finite()) {
        return Err(EmbeddingError::ContractViolation(
            "embedding contains non-finite values".to_string(),
        ));
    }

    Ok(normalize_similarity(cosine_similarity(resume, job)))
}
