//! Mock services for testing the pipeline without real models.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use studyforge_core::traits::{Analysis, Embedder, SyntacticAnalyzer};

/// A deterministic embedder.
///
/// Texts with a scripted vector get that vector; everything else gets a
/// hashed bag-of-words vector, so texts sharing words land close together.
pub struct MockEmbedder {
    /// Map of exact text → vector.
    vectors: HashMap<String, Vec<f32>>,
    /// Dimension of hashed fallback vectors.
    dimension: usize,
    /// Number of texts embedded.
    call_count: AtomicU32,
}

impl MockEmbedder {
    /// Create a mock with scripted vectors and a hashed fallback of `dimension`.
    pub fn new(vectors: HashMap<String, Vec<f32>>, dimension: usize) -> Self {
        Self {
            vectors,
            dimension,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock that only hashes.
    pub fn hashing(dimension: usize) -> Self {
        Self::new(HashMap::new(), dimension)
    }

    /// Get the number of texts embedded so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    fn hashed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension.max(1)];
        let len = vector.len() as u64;
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let bucket = fnv1a(&word.to_lowercase()) % len;
            vector[bucket as usize] += 1.0;
        }
        vector
    }
}

/// FNV-1a; stable across runs and platforms.
fn fnv1a(word: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in word.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[async_trait]
impl Embedder for MockEmbedder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.hashed(text)))
    }
}

/// A scripted syntactic analyzer.
///
/// Returns the registered analysis for an exact sentence, or an empty
/// analysis (no tokens, no chunks) for anything else.
pub struct MockAnalyzer {
    analyses: HashMap<String, Analysis>,
    call_count: AtomicU32,
    last_sentence: Mutex<Option<String>>,
}

impl MockAnalyzer {
    pub fn new(analyses: HashMap<String, Analysis>) -> Self {
        Self {
            analyses,
            call_count: AtomicU32::new(0),
            last_sentence: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this analyzer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last sentence analyzed.
    pub fn last_sentence(&self) -> Option<String> {
        self.last_sentence.lock().unwrap().clone()
    }
}

#[async_trait]
impl SyntacticAnalyzer for MockAnalyzer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, sentence: &str) -> anyhow::Result<Analysis> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_sentence.lock().unwrap() = Some(sentence.to_string());
        Ok(self.analyses.get(sentence).cloned().unwrap_or_default())
    }
}
