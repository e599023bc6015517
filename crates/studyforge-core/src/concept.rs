//! Heuristic concept (main noun phrase) extraction.
//!
//! Extraction is an ordered list of rules over the sentence's noun chunks;
//! the first rule that produces a concept wins:
//!
//! 1. the first subject chunk that is not pronoun-headed,
//! 2. otherwise the longest non-pronoun chunk (first one on ties),
//! 3. otherwise nothing. Callers skip such sentences.
//!
//! Leading determiners ("the", "a", "an") are stripped; case is preserved.

use std::sync::Arc;

use anyhow::Result;

use crate::traits::{Analysis, NounChunk, SyntacticAnalyzer};

/// Words that make a noun chunk unusable as a concept when they lead it.
pub const PRONOUNS: &[&str] = &[
    "it", "they", "this", "these", "those", "them", "their", "its", "he", "she", "we", "i", "you",
    "there", "here", "that",
];

const DETERMINERS: &[&str] = &["the", "a", "an"];

type ConceptRule = fn(&Analysis) -> Option<String>;

/// Rules in priority order.
const RULES: &[(&str, ConceptRule)] = &[
    ("subject", subject_concept),
    ("longest-chunk", longest_concept),
];

/// Extract the main concept from an already-analyzed sentence.
pub fn extract_concept(analysis: &Analysis) -> Option<String> {
    RULES.iter().find_map(|(name, rule)| {
        let concept = rule(analysis)?;
        tracing::trace!(rule = name, %concept, "concept rule matched");
        Some(concept)
    })
}

/// Whether `word` belongs to the pronoun stop set, ignoring case.
pub fn is_pronoun(word: &str) -> bool {
    let lower = word.to_lowercase();
    PRONOUNS.contains(&lower.as_str())
}

/// Remove one leading "the", "a" or "an" (any case) and trim.
pub fn strip_determiner(text: &str) -> String {
    let trimmed = text.trim();
    if let Some((first, rest)) = trimmed.split_once(char::is_whitespace) {
        if DETERMINERS.contains(&first.to_lowercase().as_str()) {
            let rest = rest.trim_start();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    trimmed.to_string()
}

/// Noun chunks whose first word is not a pronoun.
pub fn eligible_chunks(analysis: &Analysis) -> impl Iterator<Item = &NounChunk> {
    analysis
        .noun_chunks
        .iter()
        .filter(|chunk| chunk.first_word().is_some_and(|w| !is_pronoun(w)))
}

/// Strip the determiner and reject anything that still opens with a pronoun.
fn clean(chunk: &NounChunk) -> Option<String> {
    let concept = strip_determiner(&chunk.text);
    match concept.split_whitespace().next() {
        Some(first) if !is_pronoun(first) => Some(concept),
        _ => None,
    }
}

fn subject_concept(analysis: &Analysis) -> Option<String> {
    eligible_chunks(analysis)
        .filter(|chunk| chunk.is_subject())
        .find_map(clean)
}

fn longest_concept(analysis: &Analysis) -> Option<String> {
    let mut best: Option<(usize, String)> = None;
    for concept in eligible_chunks(analysis).filter_map(clean) {
        let len = concept.chars().count();
        if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
            best = Some((len, concept));
        }
    }
    best.map(|(_, concept)| concept)
}

/// Concept extraction backed by a syntactic analyzer.
pub struct ConceptExtractor {
    analyzer: Arc<dyn SyntacticAnalyzer>,
}

impl ConceptExtractor {
    pub fn new(analyzer: Arc<dyn SyntacticAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Analyze `sentence` and extract its concept, if it has one.
    pub async fn extract(&self, sentence: &str) -> Result<Option<String>> {
        let analysis = self.analyzer.analyze(sentence).await?;
        Ok(extract_concept(&analysis))
    }
}
