//! The `studyforge blank` command.

use std::path::PathBuf;

use anyhow::Result;

use super::engine_from;
use super::study::NOT_SUITABLE_MESSAGE;

pub async fn execute(
    sentence: String,
    answer: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, engine) = engine_from(config_path.as_ref(), None)?;

    let Some(blank) = engine.fill_blank(&sentence).await? else {
        println!("{NOT_SUITABLE_MESSAGE}");
        return Ok(());
    };

    println!("{}", blank.masked);
    if let Some(answer) = answer {
        if engine.check_fill_blank(&answer, &blank.target) {
            println!("Correct");
        } else {
            println!("Incorrect (expected: {})", blank.target);
        }
    }
    Ok(())
}
