//! Capability traits for the external services the pipeline depends on.
//!
//! Concrete models live behind these traits in `studyforge-providers`. The
//! core never holds a global client: every component receives its services
//! as injected `Arc<dyn ...>` handles, so tests substitute deterministic
//! fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Segmenter
// ---------------------------------------------------------------------------

/// Splits raw text into sentences.
#[async_trait]
pub trait Segmenter: Send + Sync {
    /// Human-readable segmenter name.
    fn name(&self) -> &str;

    /// Split `text` into an ordered list of sentences.
    ///
    /// Empty or whitespace-only text yields an empty list.
    async fn segment(&self, text: &str) -> anyhow::Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Embedder
// ---------------------------------------------------------------------------

/// Maps text to a fixed-dimension dense vector.
///
/// Every call within one process must return vectors of the same length.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Human-readable embedder name (e.g. "ollama").
    fn name(&self) -> &str;

    /// Embed a single string.
    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;

    /// Embed several strings, returning one vector per input in input order.
    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

// ---------------------------------------------------------------------------
// Syntactic analyzer
// ---------------------------------------------------------------------------

/// Produces tokens and noun chunks for a sentence.
#[async_trait]
pub trait SyntacticAnalyzer: Send + Sync {
    /// Human-readable analyzer name.
    fn name(&self) -> &str;

    /// Analyze one sentence.
    async fn analyze(&self, sentence: &str) -> anyhow::Result<Analysis>;
}

/// Syntactic analysis of one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub noun_chunks: Vec<NounChunk>,
}

/// One token with its lemma and dependency label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    /// Dependency label, e.g. "nsubj" or "ROOT".
    pub dep_label: String,
}

/// A base noun phrase and the dependency label of its head token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
    pub head_dep_label: String,
}

impl Token {
    pub fn new(text: &str, lemma: &str, dep_label: &str) -> Self {
        Self {
            text: text.to_string(),
            lemma: lemma.to_string(),
            dep_label: dep_label.to_string(),
        }
    }

    /// Whether this token heads the sentence.
    pub fn is_root(&self) -> bool {
        self.dep_label.eq_ignore_ascii_case("root")
    }

    /// Whether the lemma equals `lemma`, ignoring case.
    pub fn has_lemma(&self, lemma: &str) -> bool {
        self.lemma.to_lowercase() == lemma
    }
}

impl NounChunk {
    pub fn new(text: &str, head_dep_label: &str) -> Self {
        Self {
            text: text.to_string(),
            head_dep_label: head_dep_label.to_string(),
        }
    }

    /// Whether the chunk head is a nominal or passive-nominal subject.
    pub fn is_subject(&self) -> bool {
        SUBJECT_LABELS
            .iter()
            .any(|label| self.head_dep_label.eq_ignore_ascii_case(label))
    }

    /// The first whitespace-delimited word of the chunk, if any.
    pub fn first_word(&self) -> Option<&str> {
        self.text.split_whitespace().next()
    }
}

/// Dependency labels treated as grammatical subjects.
pub const SUBJECT_LABELS: &[&str] = &["nsubj", "nsubjpass", "nsubj:pass"];
