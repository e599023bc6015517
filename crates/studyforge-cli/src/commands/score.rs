//! The `studyforge score` command.

use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::evaluate::understanding_percent;

use super::engine_from;

pub async fn execute(
    reference: String,
    answer: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, engine) = engine_from(config_path.as_ref(), None)?;
    let score = engine.score_answer(&answer, &reference).await?;
    println!("Understanding: {}%", understanding_percent(score));
    Ok(())
}
