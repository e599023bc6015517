//! Vector helpers shared by the ranker and the answer evaluator.

use crate::error::PipelineError;

/// Cosine similarity between two vectors, in `[-1, 1]`.
///
/// Returns 0.0 when either vector has zero norm or holds a non-finite
/// component. Accumulates in f64.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, PipelineError> {
    if a.len() != b.len() {
        return Err(PipelineError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return Ok(0.0);
    }
    Ok(similarity.clamp(-1.0, 1.0))
}

/// Coordinate-wise mean of a set of equal-length vectors.
///
/// An empty input yields an empty vector.
pub fn centroid(vectors: &[Vec<f32>]) -> Result<Vec<f32>, PipelineError> {
    let Some(first) = vectors.first() else {
        return Ok(Vec::new());
    };
    let dim = first.len();

    let mut sums = vec![0.0f64; dim];
    for vector in vectors {
        if vector.len() != dim {
            return Err(PipelineError::DimensionMismatch {
                expected: dim,
                found: vector.len(),
            });
        }
        for (sum, &x) in sums.iter_mut().zip(vector) {
            *sum += x as f64;
        }
    }

    let n = vectors.len() as f64;
    Ok(sums.into_iter().map(|s| (s / n) as f32).collect())
}
