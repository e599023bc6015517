//! Rhetorical sentence classification from lemma patterns.

use std::sync::Arc;

use anyhow::Result;

use crate::model::QuestionType;
use crate::traits::{Analysis, SyntacticAnalyzer};

const EXPLANATION_LEMMAS: &[&str] = &["enable", "allow", "cause", "form", "flow"];
const APPLICATION_LEMMAS: &[&str] = &["use", "apply", "harness"];

type Predicate = fn(&Analysis) -> bool;

/// Classification rules, checked top to bottom. The first match wins.
pub const RULES: &[(QuestionType, Predicate)] = &[
    (QuestionType::Definition, root_is_be),
    (QuestionType::Explanation, has_explanation_lemma),
    (QuestionType::Application, has_application_lemma),
];

/// Classify an already-analyzed sentence.
pub fn classify_analysis(analysis: &Analysis) -> QuestionType {
    RULES
        .iter()
        .find(|(_, matches)| matches(analysis))
        .map(|(kind, _)| *kind)
        .unwrap_or(QuestionType::Other)
}

fn root_is_be(analysis: &Analysis) -> bool {
    analysis
        .tokens
        .iter()
        .any(|tok| tok.is_root() && tok.has_lemma("be"))
}

fn has_any_lemma(analysis: &Analysis, lemmas: &[&str]) -> bool {
    analysis
        .tokens
        .iter()
        .any(|tok| lemmas.iter().any(|lemma| tok.has_lemma(lemma)))
}

fn has_explanation_lemma(analysis: &Analysis) -> bool {
    has_any_lemma(analysis, EXPLANATION_LEMMAS)
}

fn has_application_lemma(analysis: &Analysis) -> bool {
    has_any_lemma(analysis, APPLICATION_LEMMAS)
}

/// Sentence classification backed by a syntactic analyzer.
pub struct SentenceClassifier {
    analyzer: Arc<dyn SyntacticAnalyzer>,
}

impl SentenceClassifier {
    pub fn new(analyzer: Arc<dyn SyntacticAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn classify(&self, sentence: &str) -> Result<QuestionType> {
        let analysis = self.analyzer.analyze(sentence).await?;
        Ok(classify_analysis(&analysis))
    }
}
