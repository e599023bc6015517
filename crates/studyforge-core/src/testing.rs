//! Deterministic service fakes for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::traits::{Analysis, Embedder, NounChunk, Segmenter, SyntacticAnalyzer, Token};

/// Build an [`Analysis`] from `(text, lemma, dep)` tokens and `(text, head_dep)` chunks.
pub fn analysis(tokens: &[(&str, &str, &str)], chunks: &[(&str, &str)]) -> Analysis {
    Analysis {
        tokens: tokens
            .iter()
            .map(|(text, lemma, dep)| Token::new(text, lemma, dep))
            .collect(),
        noun_chunks: chunks
            .iter()
            .map(|(text, dep)| NounChunk::new(text, dep))
            .collect(),
    }
}

/// Splits on sentence-final periods.
pub struct FakeSegmenter {
    pub calls: AtomicUsize,
}

impl FakeSegmenter {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Segmenter for FakeSegmenter {
    fn name(&self) -> &str {
        "fake"
    }

    async fn segment(&self, text: &str) -> anyhow::Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(text
            .split_inclusive('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Returns scripted vectors by exact text, or `default` for anything else.
pub struct FakeEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
    pub calls: AtomicUsize,
}

impl FakeEmbedder {
    pub fn new(vectors: &[(&str, Vec<f32>)], default: Vec<f32>) -> Self {
        Self {
            vectors: vectors
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            default,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    fn name(&self) -> &str {
        "fake"
    }

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

/// Returns scripted analyses by exact sentence, or an empty analysis.
pub struct FakeAnalyzer {
    analyses: HashMap<String, Analysis>,
    pub calls: AtomicUsize,
}

impl FakeAnalyzer {
    pub fn new(analyses: Vec<(&str, Analysis)>) -> Self {
        Self {
            analyses: analyses
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SyntacticAnalyzer for FakeAnalyzer {
    fn name(&self) -> &str {
        "fake"
    }

    async fn analyze(&self, sentence: &str) -> anyhow::Result<Analysis> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.analyses.get(sentence).cloned().unwrap_or_default())
    }
}

/// Always fails, for error propagation tests.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn embed(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        Err(crate::error::ProviderError::NetworkError("embedder offline".into()).into())
    }
}

/// The two-sentence photosynthesis document used across tests.
pub const PHOTOSYNTHESIS: &str =
    "Photosynthesis is the process by which plants convert light into energy.";
pub const CHLOROPHYLL: &str = "Chlorophyll enables this conversion.";

pub fn photosynthesis_analysis() -> Analysis {
    analysis(
        &[
            ("Photosynthesis", "photosynthesis", "nsubj"),
            ("is", "be", "ROOT"),
            ("the", "the", "det"),
            ("process", "process", "attr"),
            ("by", "by", "prep"),
            ("which", "which", "pobj"),
            ("plants", "plant", "nsubj"),
            ("convert", "convert", "relcl"),
            ("light", "light", "dobj"),
            ("into", "into", "prep"),
            ("energy", "energy", "pobj"),
            (".", ".", "punct"),
        ],
        &[
            ("Photosynthesis", "nsubj"),
            ("the process", "attr"),
            ("which", "pobj"),
            ("plants", "nsubj"),
            ("light", "dobj"),
            ("energy", "pobj"),
        ],
    )
}

pub fn chlorophyll_analysis() -> Analysis {
    analysis(
        &[
            ("Chlorophyll", "chlorophyll", "nsubj"),
            ("enables", "enable", "ROOT"),
            ("this", "this", "det"),
            ("conversion", "conversion", "dobj"),
            (".", ".", "punct"),
        ],
        &[("Chlorophyll", "nsubj"), ("this conversion", "dobj")],
    )
}
