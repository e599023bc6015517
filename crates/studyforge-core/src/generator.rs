//! Question generation from ranked sentences.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::classify::classify_analysis;
use crate::concept::extract_concept;
use crate::model::{Question, QuestionType};
use crate::traits::SyntacticAnalyzer;

/// Turns sentences into deduplicated question records.
pub struct QuestionGenerator {
    analyzer: Arc<dyn SyntacticAnalyzer>,
}

impl QuestionGenerator {
    pub fn new(analyzer: Arc<dyn SyntacticAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Generate at most `limit` questions, in the order of `sentences`.
    ///
    /// Sentences without a concept, sentences classified as "other", and
    /// sentences whose concept repeats one already asked about are skipped.
    /// Fewer qualifying sentences means fewer questions; the batch is never
    /// padded.
    pub async fn generate(&self, sentences: &[String], limit: usize) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        if limit == 0 {
            return Ok(questions);
        }
        let mut seen = HashSet::new();

        for sentence in sentences {
            let analysis = self.analyzer.analyze(sentence).await?;
            let kind = classify_analysis(&analysis);

            let Some(concept) = extract_concept(&analysis) else {
                debug!(%sentence, "skipping sentence: no concept");
                continue;
            };

            let key = concept_key(&concept);
            if seen.contains(&key) {
                debug!(%sentence, %key, "skipping sentence: duplicate concept");
                continue;
            }

            let Some(question) = render_question(kind, &concept) else {
                debug!(%sentence, "skipping sentence: unclassified");
                continue;
            };

            seen.insert(key);
            questions.push(Question {
                kind,
                question,
                answer: sentence.clone(),
            });

            if questions.len() >= limit {
                break;
            }
        }

        Ok(questions)
    }
}

/// Dedup key: lowercase, keeping only alphanumerics and whitespace.
pub fn concept_key(concept: &str) -> String {
    concept
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Render the question text for a concept, or `None` for [`QuestionType::Other`].
pub fn render_question(kind: QuestionType, concept: &str) -> Option<String> {
    match kind {
        QuestionType::Definition => {
            if concept.to_lowercase().ends_with('s') {
                Some(format!("What are {concept}?"))
            } else {
                Some(format!("What is {concept}?"))
            }
        }
        QuestionType::Explanation => Some(format!("Explain {concept}.")),
        QuestionType::Application => Some(format!("Where is {concept} used?")),
        QuestionType::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        analysis, chlorophyll_analysis, photosynthesis_analysis, FakeAnalyzer, CHLOROPHYLL,
        PHOTOSYNTHESIS,
    };

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn definition(subject: &str) -> crate::traits::Analysis {
        analysis(
            &[(subject, subject, "nsubj"), ("is", "be", "ROOT")],
            &[(subject, "nsubj")],
        )
    }

    #[test]
    fn render_templates() {
        assert_eq!(
            render_question(QuestionType::Definition, "Osmosis").as_deref(),
            Some("What are Osmosis?")
        );
        assert_eq!(
            render_question(QuestionType::Definition, "DNA").as_deref(),
            Some("What is DNA?")
        );
        assert_eq!(
            render_question(QuestionType::Explanation, "Chlorophyll").as_deref(),
            Some("Explain Chlorophyll.")
        );
        assert_eq!(
            render_question(QuestionType::Application, "solar power").as_deref(),
            Some("Where is solar power used?")
        );
        assert_eq!(render_question(QuestionType::Other, "anything"), None);
    }

    #[test]
    fn concept_key_normalization() {
        assert_eq!(concept_key("The Cell-Wall!"), "the cellwall");
        assert_eq!(concept_key("cell wall"), concept_key("Cell Wall."));
    }

    #[tokio::test]
    async fn photosynthesis_scenario() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![
            (PHOTOSYNTHESIS, photosynthesis_analysis()),
            (CHLOROPHYLL, chlorophyll_analysis()),
        ]));
        let generator = QuestionGenerator::new(analyzer.clone());
        let questions = generator
            .generate(&sentences(&[PHOTOSYNTHESIS, CHLOROPHYLL]), 2)
            .await
            .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].kind, QuestionType::Definition);
        assert_eq!(questions[0].question, "What are Photosynthesis?");
        assert_eq!(questions[0].answer, PHOTOSYNTHESIS);
        assert_eq!(questions[1].kind, QuestionType::Explanation);
        assert_eq!(questions[1].question, "Explain Chlorophyll.");
        // One analysis per sentence.
        assert_eq!(analyzer.calls(), 2);
    }

    #[tokio::test]
    async fn pronoun_subject_sentence_is_skipped() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![(
            "it is red.",
            analysis(
                &[("it", "it", "nsubj"), ("is", "be", "ROOT"), ("red", "red", "acomp")],
                &[("it", "nsubj")],
            ),
        )]));
        let generator = QuestionGenerator::new(analyzer);
        let questions = generator
            .generate(&sentences(&["it is red."]), 5)
            .await
            .unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn fewer_qualifying_sentences_than_limit() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![
            ("Atoms are small.", definition("Atoms")),
            ("Nothing here.", analysis(&[("here", "here", "ROOT")], &[])),
            ("Ions are charged.", definition("Ions")),
        ]));
        let generator = QuestionGenerator::new(analyzer);
        let questions = generator
            .generate(
                &sentences(&["Atoms are small.", "Nothing here.", "Ions are charged."]),
                5,
            )
            .await
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "What are Atoms?");
        assert_eq!(questions[1].question, "What are Ions?");
    }

    #[tokio::test]
    async fn other_type_is_skipped() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![(
            "Plants grow.",
            analysis(&[("grow", "grow", "ROOT")], &[("Plants", "nsubj")]),
        )]));
        let generator = QuestionGenerator::new(analyzer);
        assert!(generator
            .generate(&sentences(&["Plants grow."]), 3)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn duplicate_concepts_are_dropped() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![
            ("The Nucleus is central.", definition("The Nucleus")),
            ("A nucleus is dense.", definition("A nucleus")),
            ("nucleus! is a word.", definition("nucleus!")),
            ("Mass is weight.", definition("Mass")),
        ]));
        let generator = QuestionGenerator::new(analyzer);
        let questions = generator
            .generate(
                &sentences(&[
                    "The Nucleus is central.",
                    "A nucleus is dense.",
                    "nucleus! is a word.",
                    "Mass is weight.",
                ]),
                10,
            )
            .await
            .unwrap();

        let asked: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(asked, vec!["What is Nucleus?", "What are Mass?"]);
    }

    #[tokio::test]
    async fn stops_at_limit() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![
            ("Atoms are small.", definition("Atoms")),
            ("Ions are charged.", definition("Ions")),
            ("Mass is weight.", definition("Mass")),
        ]));
        let generator = QuestionGenerator::new(analyzer.clone());
        let questions = generator
            .generate(
                &sentences(&["Atoms are small.", "Ions are charged.", "Mass is weight."]),
                2,
            )
            .await
            .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(analyzer.calls(), 2);
    }

    #[tokio::test]
    async fn zero_limit_skips_analysis() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![]));
        let generator = QuestionGenerator::new(analyzer.clone());
        assert!(generator
            .generate(&sentences(&["Atoms are small."]), 0)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(analyzer.calls(), 0);
    }

    #[tokio::test]
    async fn dedup_does_not_leak_across_calls() {
        let analyzer = Arc::new(FakeAnalyzer::new(vec![(
            "Atoms are small.",
            definition("Atoms"),
        )]));
        let generator = QuestionGenerator::new(analyzer);
        let input = sentences(&["Atoms are small."]);
        assert_eq!(generator.generate(&input, 1).await.unwrap().len(), 1);
        assert_eq!(generator.generate(&input, 1).await.unwrap().len(), 1);
    }
}
