pub mod blank;
pub mod generate;
pub mod init;
pub mod score;
pub mod study;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use studyforge_core::engine::{GenerationOutcome, StudyEngine};
use studyforge_providers::config::{load_config_from, MAX_QUESTIONS};
use studyforge_providers::{build_engine, StudyforgeConfig};

/// Read study notes from a file, or stdin when the path is "-".
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read notes from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read notes: {}", path.display()))
    }
}

/// Check a requested question count against the allowed range.
pub fn validate_count(count: usize) -> Result<usize> {
    anyhow::ensure!(
        (1..=MAX_QUESTIONS).contains(&count),
        "question count must be between 1 and {MAX_QUESTIONS}, got {count}"
    );
    Ok(count)
}

/// Load config and build an engine, applying a `top_k` override.
pub fn engine_from(
    config_path: Option<&PathBuf>,
    top_k: Option<usize>,
) -> Result<(StudyforgeConfig, StudyEngine)> {
    let mut config = load_config_from(config_path.map(PathBuf::as_path))?;
    if let Some(k) = top_k {
        anyhow::ensure!(k >= 1, "top-k must be at least 1");
        config.top_k = k;
    }
    let engine = build_engine(&config)?;
    tracing::debug!(top_k = config.top_k, "engine ready");
    Ok((config, engine))
}

pub const NO_INPUT_MESSAGE: &str = "Please paste some study material.";
pub const NO_QUESTIONS_MESSAGE: &str = "No meaningful questions could be generated.";

/// The learner-facing status line for a generation outcome.
pub fn outcome_message(outcome: &GenerationOutcome) -> String {
    match outcome {
        GenerationOutcome::NoInput => NO_INPUT_MESSAGE.to_string(),
        GenerationOutcome::NoQuestions { .. } => NO_QUESTIONS_MESSAGE.to_string(),
        GenerationOutcome::Generated { questions, .. } if outcome.is_partial() => {
            format!("Only {} questions available.", questions.len())
        }
        GenerationOutcome::Generated { questions, .. } => {
            format!("Generated {} questions.", questions.len())
        }
    }
}
