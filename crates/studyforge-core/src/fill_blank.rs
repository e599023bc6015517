//! Fill-in-the-blank items: mask the longest noun phrase, check exact answers.

use std::sync::Arc;

use anyhow::Result;
use regex::RegexBuilder;

use crate::concept::eligible_chunks;
use crate::model::FillBlank;
use crate::traits::{Analysis, SyntacticAnalyzer};

/// Text substituted for the masked phrase.
pub const BLANK_PLACEHOLDER: &str = "__________";

/// Build a fill-blank item from an analyzed sentence.
///
/// Returns `None` when the sentence has no non-pronoun noun chunk; such a
/// sentence is not eligible for fill-in-the-blank.
pub fn make_fill_blank(sentence: &str, analysis: &Analysis) -> Option<FillBlank> {
    let mut target: Option<(usize, &str)> = None;
    for chunk in eligible_chunks(analysis) {
        let text = chunk.text.trim();
        let len = text.chars().count();
        if target.map_or(true, |(best, _)| len > best) {
            target = Some((len, text));
        }
    }
    let (_, target) = target?;

    // Escaped literals always compile.
    let pattern = RegexBuilder::new(&regex::escape(target))
        .case_insensitive(true)
        .build()
        .ok()?;
    let found = pattern.find(sentence)?;

    let masked = format!(
        "{}{}{}",
        &sentence[..found.start()],
        BLANK_PLACEHOLDER,
        &sentence[found.end()..]
    );
    Some(FillBlank {
        masked,
        target: target.to_lowercase(),
    })
}

/// Exact match after dropping non-word characters and lowercasing.
///
/// Blank answers and targets never match.
pub fn check_fill_blank(user_answer: &str, target: &str) -> bool {
    let answer = normalize(user_answer);
    let target = normalize(target);
    !answer.is_empty() && !target.is_empty() && answer == target
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Fill-blank generation backed by a syntactic analyzer.
pub struct FillBlankGenerator {
    analyzer: Arc<dyn SyntacticAnalyzer>,
}

impl FillBlankGenerator {
    pub fn new(analyzer: Arc<dyn SyntacticAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn generate(&self, sentence: &str) -> Result<Option<FillBlank>> {
        let analysis = self.analyzer.analyze(sentence).await?;
        Ok(make_fill_blank(sentence, &analysis))
    }
}
