//! Sentence segmentation using Unicode (UAX #29) sentence boundaries.

use async_trait::async_trait;
use unicode_segmentation::UnicodeSegmentation;

use studyforge_core::traits::Segmenter;

/// Abbreviations after which UAX #29 breaks but prose does not.
const ABBREVIATIONS: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "prof.", "st.", "vs.", "etc.", "e.g.", "i.e.",
];

/// Rule-based segmenter; needs no external service.
#[derive(Debug, Default, Clone)]
pub struct UnicodeSegmenter;

impl UnicodeSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into trimmed sentence slices.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        let mut continues_previous = false;

        for (offset, piece) in text.split_sentence_bound_indices() {
            let trimmed = piece.trim();
            if trimmed.is_empty() {
                continue;
            }
            let start = offset + (piece.len() - piece.trim_start().len());
            let end = start + trimmed.len();

            match spans.last_mut() {
                Some(span) if continues_previous => span.1 = end,
                _ => spans.push((start, end)),
            }
            continues_previous = ends_with_abbreviation(trimmed);
        }

        spans.into_iter().map(|(start, end)| &text[start..end]).collect()
    }
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    sentence
        .split_whitespace()
        .last()
        .map(|word| word.trim_start_matches(|c: char| !c.is_alphanumeric()))
        .is_some_and(|word| ABBREVIATIONS.contains(&word.to_lowercase().as_str()))
}

#[async_trait]
impl Segmenter for UnicodeSegmenter {
    fn name(&self) -> &str {
        "unicode"
    }

    async fn segment(&self, text: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.split(text).into_iter().map(String::from).collect())
    }
}
