//! studyforge-providers: Service adapters and configuration.
//!
//! Implements the `Embedder`, `SyntacticAnalyzer` and `Segmenter` traits from
//! `studyforge-core` for Ollama, OpenAI-compatible endpoints, a JSON syntactic
//! analysis service and Unicode sentence segmentation, plus the TOML
//! configuration that selects between them.

pub mod analyzer;
pub mod config;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod segment;

pub use config::{
    build_engine, create_analyzer, create_embedder, create_segmenter, load_config,
    AnalyzerConfig, EmbedderConfig, StudyforgeConfig,
};
pub use studyforge_core::error::ProviderError;
