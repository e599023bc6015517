//! Configuration and service factories.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studyforge_core::engine::{EngineConfig, StudyEngine};
use studyforge_core::model::AnswerMode;
use studyforge_core::traits::{Embedder, Segmenter, SyntacticAnalyzer};

use crate::analyzer::HttpAnalyzer;
use crate::ollama::OllamaEmbedder;
use crate::openai::OpenAiEmbedder;
use crate::segment::UnicodeSegmenter;

/// Upper bound on questions per request.
pub const MAX_QUESTIONS: usize = 10;

/// Which embedding backend to use.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbedderConfig {
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        dimensions: Option<usize>,
    },
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        EmbedderConfig::Ollama {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

impl std::fmt::Debug for EmbedderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedderConfig::Ollama { base_url, model } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .field("model", model)
                .finish(),
            EmbedderConfig::OpenAI {
                api_key: _,
                base_url,
                model,
                dimensions,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("model", model)
                .field("dimensions", dimensions)
                .finish(),
        }
    }
}

/// Which syntactic analyzer to use.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnalyzerConfig {
    Http {
        #[serde(default = "default_analyzer_url")]
        url: String,
        #[serde(default)]
        api_key: Option<String>,
    },
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig::Http {
            url: default_analyzer_url(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerConfig::Http { url, api_key } => f
                .debug_struct("Http")
                .field("url", url)
                .field("api_key", &api_key.as_ref().map(|_| "***"))
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_ollama_model() -> String {
    "all-minilm".to_string()
}
fn default_analyzer_url() -> String {
    "http://localhost:8000/analyze".to_string()
}

/// Top-level studyforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyforgeConfig {
    /// Embedding backend.
    #[serde(default)]
    pub embedder: EmbedderConfig,
    /// Syntactic analysis backend.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    /// Sentences kept by the extractive ranker.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Default number of questions per request.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Default answer mode for study sessions.
    #[serde(default)]
    pub answer_mode: AnswerMode,
}

fn default_top_k() -> usize {
    10
}
fn default_question_count() -> usize {
    5
}

impl Default for StudyforgeConfig {
    fn default() -> Self {
        Self {
            embedder: EmbedderConfig::default(),
            analyzer: AnalyzerConfig::default(),
            top_k: default_top_k(),
            question_count: default_question_count(),
            answer_mode: AnswerMode::default(),
        }
    }
}

impl StudyforgeConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.top_k >= 1, "top_k must be at least 1");
        anyhow::ensure!(
            (1..=MAX_QUESTIONS).contains(&self.question_count),
            "question_count must be between 1 and {MAX_QUESTIONS}"
        );
        Ok(())
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            top_k: self.top_k,
            max_questions: MAX_QUESTIONS,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_embedder_config(config: &EmbedderConfig) -> EmbedderConfig {
    match config {
        EmbedderConfig::Ollama { base_url, model } => EmbedderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
            model: resolve_env_vars(model),
        },
        EmbedderConfig::OpenAI {
            api_key,
            base_url,
            model,
            dimensions,
        } => EmbedderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_deref().map(resolve_env_vars),
            model: model.as_deref().map(resolve_env_vars),
            dimensions: *dimensions,
        },
    }
}

fn resolve_analyzer_config(config: &AnalyzerConfig) -> AnalyzerConfig {
    match config {
        AnalyzerConfig::Http { url, api_key } => AnalyzerConfig::Http {
            url: resolve_env_vars(url),
            api_key: api_key.as_deref().map(resolve_env_vars),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studyforge.toml` in the current directory
/// 2. `~/.config/studyforge/config.toml`
///
/// Environment variable overrides: `STUDYFORGE_OPENAI_KEY`, `STUDYFORGE_ANALYZER_URL`.
pub fn load_config() -> Result<StudyforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studyforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudyforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudyforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(key) = std::env::var("STUDYFORGE_OPENAI_KEY") {
        if let EmbedderConfig::OpenAI { api_key, .. } = &mut config.embedder {
            *api_key = key;
        }
    }
    if let Ok(override_url) = std::env::var("STUDYFORGE_ANALYZER_URL") {
        let AnalyzerConfig::Http { url, .. } = &mut config.analyzer;
        *url = override_url;
    }

    config.embedder = resolve_embedder_config(&config.embedder);
    config.analyzer = resolve_analyzer_config(&config.analyzer);
    config.validate()?;

    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studyforge"))
}

/// Create an embedder from its configuration.
pub fn create_embedder(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>> {
    match config {
        EmbedderConfig::Ollama { base_url, model } => {
            Ok(Arc::new(OllamaEmbedder::new(base_url, model)?))
        }
        EmbedderConfig::OpenAI {
            api_key,
            base_url,
            model,
            dimensions,
        } => Ok(Arc::new(OpenAiEmbedder::new(
            api_key,
            base_url.clone(),
            model.clone(),
            *dimensions,
        )?)),
    }
}

/// Create a syntactic analyzer from its configuration.
pub fn create_analyzer(config: &AnalyzerConfig) -> Result<Arc<dyn SyntacticAnalyzer>> {
    match config {
        AnalyzerConfig::Http { url, api_key } => {
            Ok(Arc::new(HttpAnalyzer::new(url, api_key.clone())?))
        }
    }
}

/// Create the sentence segmenter.
pub fn create_segmenter() -> Arc<dyn Segmenter> {
    Arc::new(UnicodeSegmenter::new())
}

/// Build a ready-to-use engine from configuration.
pub fn build_engine(config: &StudyforgeConfig) -> Result<StudyEngine> {
    Ok(StudyEngine::new(
        create_segmenter(),
        create_embedder(&config.embedder)?,
        create_analyzer(&config.analyzer)?,
        config.engine_config(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_STUDYFORGE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_STUDYFORGE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_STUDYFORGE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no refs"), "no refs");
        std::env::remove_var("_STUDYFORGE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = StudyforgeConfig::default();
        assert_eq!(config.top_k, 10);
        assert_eq!(config.question_count, 5);
        assert_eq!(config.answer_mode, AnswerMode::ShortAnswer);
        assert!(matches!(config.embedder, EmbedderConfig::Ollama { .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
top_k = 8
question_count = 3
answer_mode = "fill-blank"

[embedder]
type = "openai"
api_key = "sk-test"
model = "text-embedding-3-small"
dimensions = 384

[analyzer]
type = "http"
url = "http://parser.local/analyze"
"#;
        let config: StudyforgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.top_k, 8);
        assert_eq!(config.answer_mode, AnswerMode::FillBlank);
        assert!(matches!(
            config.embedder,
            EmbedderConfig::OpenAI {
                dimensions: Some(384),
                ..
            }
        ));
        let AnalyzerConfig::Http { url, .. } = &config.analyzer;
        assert_eq!(url, "http://parser.local/analyze");
    }

    #[test]
    fn ollama_fields_default() {
        let config: StudyforgeConfig = toml::from_str("[embedder]\ntype = \"ollama\"\n").unwrap();
        match config.embedder {
            EmbedderConfig::Ollama { base_url, model } => {
                assert_eq!(base_url, "http://localhost:11434");
                assert_eq!(model, "all-minilm");
            }
            other => panic!("unexpected embedder: {other:?}"),
        }
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = EmbedderConfig::OpenAI {
            api_key: "sk-secret".into(),
            base_url: None,
            model: None,
            dimensions: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studyforge.toml");
        std::fs::write(&path, "question_count = 7\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.question_count, 7);
        assert_eq!(config.top_k, 10);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/studyforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn out_of_range_question_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studyforge.toml");
        std::fs::write(&path, "question_count = 11\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn factories_build_services() {
        let config = StudyforgeConfig::default();
        let embedder = create_embedder(&config.embedder).unwrap();
        assert_eq!(embedder.name(), "ollama");
        let analyzer = create_analyzer(&config.analyzer).unwrap();
        assert_eq!(analyzer.name(), "http");
        assert_eq!(create_segmenter().name(), "unicode");
        assert!(build_engine(&config).is_ok());
    }
}
