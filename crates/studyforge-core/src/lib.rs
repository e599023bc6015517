//! studyforge-core: Question generation and answer scoring pipeline.
//!
//! This crate turns study text into self-assessment questions and scores
//! learner answers. External services (sentence segmentation, embeddings,
//! syntactic analysis) are reached only through the capability traits in
//! [`traits`], so every component can run against deterministic fakes.

pub mod classify;
pub mod concept;
pub mod engine;
pub mod error;
pub mod evaluate;
pub mod fill_blank;
pub mod generator;
pub mod model;
pub mod ranker;
pub mod similarity;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{EngineConfig, GenerationOutcome, StudyEngine};
pub use error::{PipelineError, ProviderError};
pub use model::{AnswerMode, FillBlank, Question, QuestionType, ScoredSentence};
