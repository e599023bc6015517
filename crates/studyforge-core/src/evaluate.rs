//! Short-answer scoring by semantic similarity.

use std::sync::Arc;

use anyhow::Result;

use crate::similarity::cosine_similarity;
use crate::traits::Embedder;

/// Scores a learner's free-text answer against a reference sentence.
pub struct AnswerEvaluator {
    embedder: Arc<dyn Embedder>,
}

impl AnswerEvaluator {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Similarity of `user_answer` to `reference`, remapped to `[0, 1]`.
    ///
    /// A blank answer scores 0.0 without touching the embedder.
    pub async fn score(&self, user_answer: &str, reference: &str) -> Result<f64> {
        if user_answer.trim().is_empty() {
            return Ok(0.0);
        }

        let reference_vector = self.embedder.embed(reference).await?;
        let answer_vector = self.embedder.embed(user_answer).await?;
        let similarity = cosine_similarity(&reference_vector, &answer_vector)?;

        Ok(((similarity + 1.0) / 2.0).clamp(0.0, 1.0))
    }
}

/// Whole-percent readout of a score, truncated (0.739 -> 73).
pub fn understanding_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingEmbedder, FakeEmbedder};

    fn evaluator(vectors: &[(&str, Vec<f32>)]) -> (Arc<FakeEmbedder>, AnswerEvaluator) {
        let embedder = Arc::new(FakeEmbedder::new(vectors, vec![0.0, 1.0]));
        (embedder.clone(), AnswerEvaluator::new(embedder))
    }

    #[tokio::test]
    async fn blank_answer_scores_zero_without_embedding() {
        let (embedder, evaluator) = evaluator(&[]);
        assert_eq!(evaluator.score("", "Anything.").await.unwrap(), 0.0);
        assert_eq!(evaluator.score("   \n", "Anything.").await.unwrap(), 0.0);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn identical_meaning_scores_one() {
        let (_, evaluator) = evaluator(&[("a", vec![1.0, 0.0]), ("b", vec![2.0, 0.0])]);
        assert!((evaluator.score("a", "b").await.unwrap() - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn opposite_and_orthogonal_stay_in_range() {
        let (_, evaluator) = evaluator(&[
            ("up", vec![1.0, 0.0]),
            ("down", vec![-1.0, 0.0]),
            ("side", vec![0.0, 1.0]),
        ]);
        assert_eq!(evaluator.score("up", "down").await.unwrap(), 0.0);
        assert!((evaluator.score("up", "side").await.unwrap() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn score_is_symmetric() {
        let (_, evaluator) = evaluator(&[
            ("mitochondria make energy", vec![0.3, 0.9, -0.2]),
            ("the powerhouse of the cell", vec![0.4, 0.7, 0.1]),
        ]);
        let ab = evaluator
            .score("mitochondria make energy", "the powerhouse of the cell")
            .await
            .unwrap();
        let ba = evaluator
            .score("the powerhouse of the cell", "mitochondria make energy")
            .await
            .unwrap();
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
    }

    #[tokio::test]
    async fn infinite_embedding_stays_in_range() {
        let (_, evaluator) = evaluator(&[
            ("ans", vec![f32::INFINITY, 1.0]),
            ("ref", vec![1.0, 1.0]),
        ]);
        let score = evaluator.score("ans", "ref").await.unwrap();
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.5);
    }

    #[tokio::test]
    async fn embedder_failure_propagates() {
        let evaluator = AnswerEvaluator::new(Arc::new(FailingEmbedder));
        assert!(evaluator.score("answer", "reference").await.is_err());
    }

    #[test]
    fn percent_truncates() {
        assert_eq!(understanding_percent(0.739), 73);
        assert_eq!(understanding_percent(1.0), 100);
        assert_eq!(understanding_percent(0.0), 0);
    }
}
