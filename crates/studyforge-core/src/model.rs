//! Core data model types for studyforge.
//!
//! Everything here is computed on demand from one input text and discarded
//! after the call, except the batch of [`Question`]s, which the interactive
//! surface holds read-only for the length of a study session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rhetorical type of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Definition,
    Explanation,
    Application,
    Other,
}

impl QuestionType {
    /// Capitalized name for headings (e.g. "Definition").
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Definition => "Definition",
            QuestionType::Explanation => "Explanation",
            QuestionType::Application => "Application",
            QuestionType::Other => "Other",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Definition => write!(f, "definition"),
            QuestionType::Explanation => write!(f, "explanation"),
            QuestionType::Application => write!(f, "application"),
            QuestionType::Other => write!(f, "other"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "definition" => Ok(QuestionType::Definition),
            "explanation" => Ok(QuestionType::Explanation),
            "application" => Ok(QuestionType::Application),
            "other" => Ok(QuestionType::Other),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A generated self-assessment question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Never [`QuestionType::Other`].
    #[serde(rename = "type")]
    pub kind: QuestionType,
    /// The rendered question text.
    pub question: String,
    /// The source sentence, used as the reference answer.
    pub answer: String,
}

/// A sentence paired with its similarity to the document centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSentence {
    pub text: String,
    /// Cosine similarity in `[-1, 1]`.
    pub score: f64,
}

/// A sentence with its longest noun phrase blanked out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlank {
    /// The sentence with the target replaced by the blank placeholder.
    pub masked: String,
    /// The removed phrase, lowercased.
    pub target: String,
}

/// How the learner answers questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerMode {
    #[default]
    ShortAnswer,
    FillBlank,
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerMode::ShortAnswer => write!(f, "short-answer"),
            AnswerMode::FillBlank => write!(f, "fill-blank"),
        }
    }
}

impl FromStr for AnswerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "short-answer" | "short" => Ok(AnswerMode::ShortAnswer),
            "fill-blank" | "fill-in-the-blank" | "blank" => Ok(AnswerMode::FillBlank),
            other => Err(format!("unknown answer mode: {other}")),
        }
    }
}
