//! Extractive summarization: rank sentences by closeness to the document centroid.

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::error::PipelineError;
use crate::model::ScoredSentence;
use crate::similarity::{centroid, cosine_similarity};
use crate::traits::Embedder;

/// Scores sentences by cosine similarity to the mean of all sentence embeddings.
pub struct ExtractiveRanker {
    embedder: Arc<dyn Embedder>,
}

impl ExtractiveRanker {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Return the `top_k` most central sentences, most central first.
    pub async fn rank(&self, sentences: &[String], top_k: usize) -> Result<Vec<String>> {
        Ok(self
            .rank_scored(sentences, top_k)
            .await?
            .into_iter()
            .map(|s| s.text)
            .collect())
    }

    /// Like [`rank`](Self::rank) but keeps each sentence's score.
    ///
    /// Scores are non-increasing; equal scores keep document order.
    pub async fn rank_scored(
        &self,
        sentences: &[String],
        top_k: usize,
    ) -> Result<Vec<ScoredSentence>> {
        if sentences.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let inputs: Vec<&str> = sentences.iter().map(String::as_str).collect();
        let vectors = self.embedder.embed_batch(&inputs).await?;
        if vectors.len() != sentences.len() {
            return Err(PipelineError::EmbeddingCountMismatch {
                expected: sentences.len(),
                found: vectors.len(),
            }
            .into());
        }

        let doc_vector = centroid(&vectors)?;
        let mut scored = Vec::with_capacity(sentences.len());
        for (text, vector) in sentences.iter().zip(&vectors) {
            scored.push(ScoredSentence {
                text: text.clone(),
                score: cosine_similarity(vector, &doc_vector)?,
            });
        }

        // sort_by is stable: equal scores stay in document order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);

        debug!(
            embedder = self.embedder.name(),
            sentences = sentences.len(),
            kept = scored.len(),
            "ranked sentences"
        );
        Ok(scored)
    }
}
