//! Pipeline orchestrator.
//!
//! Wires segmentation, extractive ranking and question generation into one
//! `generate` call, and exposes answer scoring and fill-blank checks for the
//! interactive surface. Every call awaits its services one at a time and
//! keeps no state between calls.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::evaluate::AnswerEvaluator;
use crate::fill_blank::{check_fill_blank, FillBlankGenerator};
use crate::generator::QuestionGenerator;
use crate::model::{FillBlank, Question};
use crate::ranker::ExtractiveRanker;
use crate::traits::{Embedder, Segmenter, SyntacticAnalyzer};

/// Configuration for the study engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of ranked sentences handed to the question generator.
    pub top_k: usize,
    /// Largest question count a caller may request.
    pub max_questions: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            max_questions: 10,
        }
    }
}

/// Result of one generation request.
///
/// The three non-success shapes each call for a different message on the
/// learner side, so they are kept apart here rather than folded into an
/// empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The text was empty or whitespace; nothing was sent to any service.
    NoInput,
    /// The text was processed but no sentence qualified.
    NoQuestions { requested: usize },
    /// At least one question was generated.
    Generated {
        questions: Vec<Question>,
        requested: usize,
    },
}

impl GenerationOutcome {
    pub fn questions(&self) -> &[Question] {
        match self {
            GenerationOutcome::Generated { questions, .. } => questions,
            _ => &[],
        }
    }

    pub fn into_questions(self) -> Vec<Question> {
        match self {
            GenerationOutcome::Generated { questions, .. } => questions,
            _ => Vec::new(),
        }
    }

    /// Whether fewer questions than requested were generated.
    pub fn is_partial(&self) -> bool {
        match self {
            GenerationOutcome::Generated {
                questions,
                requested,
            } => questions.len() < *requested,
            _ => false,
        }
    }
}

/// The study pipeline.
pub struct StudyEngine {
    segmenter: Arc<dyn Segmenter>,
    ranker: ExtractiveRanker,
    generator: QuestionGenerator,
    evaluator: AnswerEvaluator,
    fill_blank: FillBlankGenerator,
    config: EngineConfig,
}

impl StudyEngine {
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        embedder: Arc<dyn Embedder>,
        analyzer: Arc<dyn SyntacticAnalyzer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            segmenter,
            ranker: ExtractiveRanker::new(Arc::clone(&embedder)),
            generator: QuestionGenerator::new(Arc::clone(&analyzer)),
            evaluator: AnswerEvaluator::new(embedder),
            fill_blank: FillBlankGenerator::new(analyzer),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generate up to `count` questions from `text`.
    pub async fn generate(&self, text: &str, count: usize) -> Result<GenerationOutcome> {
        if count == 0 || count > self.config.max_questions {
            return Err(PipelineError::InvalidQuestionCount {
                requested: count,
                max: self.config.max_questions,
            }
            .into());
        }
        if text.trim().is_empty() {
            return Ok(GenerationOutcome::NoInput);
        }

        let sentences = self.segmenter.segment(text).await?;
        let top = self.ranker.rank(&sentences, self.config.top_k).await?;
        let questions = self.generator.generate(&top, count).await?;

        info!(
            sentences = sentences.len(),
            ranked = top.len(),
            generated = questions.len(),
            requested = count,
            "generated questions"
        );

        if questions.is_empty() {
            return Ok(GenerationOutcome::NoQuestions { requested: count });
        }
        if questions.len() < count {
            warn!(
                "only {} of {} requested questions could be generated",
                questions.len(),
                count
            );
        }
        Ok(GenerationOutcome::Generated {
            questions,
            requested: count,
        })
    }

    /// Score a short answer against the question's reference sentence.
    pub async fn score_answer(&self, user_answer: &str, reference: &str) -> Result<f64> {
        self.evaluator.score(user_answer, reference).await
    }

    /// Build the fill-blank form of a reference sentence, if it has one.
    pub async fn fill_blank(&self, sentence: &str) -> Result<Option<FillBlank>> {
        self.fill_blank.generate(sentence).await
    }

    pub fn check_fill_blank(&self, user_answer: &str, target: &str) -> bool {
        check_fill_blank(user_answer, target)
    }
}
