//! Error types.
//!
//! [`ProviderError`] represents failures of an external service (embedding
//! model, syntactic analyzer). It lives in `studyforge-core` so adapters and
//! callers can match on the failure kind without string matching. [`PipelineError`] covers malformed service output and invalid
//! requests detected by the core itself.
//!
//! Empty input, sentences without a concept, fill-blank ineligibility and
//! short batches are not errors; see
//! [`GenerationOutcome`](crate::engine::GenerationOutcome).

use thiserror::Error;

/// Errors that can occur when talking to an external service.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The service returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The service returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The service answered, but with a body we could not use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised by the pipeline itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// Two vectors that must share a dimension did not.
    #[error("embedding dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A batch embedding call returned the wrong number of vectors.
    #[error("embedder returned {found} vectors for {expected} inputs")]
    EmbeddingCountMismatch { expected: usize, found: usize },

    /// The requested number of questions is outside `1..=max`.
    #[error("question count must be between 1 and {max}, got {requested}")]
    InvalidQuestionCount { requested: usize, max: usize },
}
