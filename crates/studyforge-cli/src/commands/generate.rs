//! The `studyforge generate` command.

use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::engine::GenerationOutcome;
use studyforge_core::model::Question;

use super::{engine_from, outcome_message, read_input, validate_count, NO_INPUT_MESSAGE};

pub async fn execute(
    input: PathBuf,
    count: Option<usize>,
    top_k: Option<usize>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if format != "text" && format != "json" {
        anyhow::bail!("unknown format: {format} (expected text or json)");
    }
    if let Some(count) = count {
        validate_count(count)?;
    }

    let text = read_input(&input)?;
    if text.trim().is_empty() {
        eprintln!("{NO_INPUT_MESSAGE}");
        return Ok(());
    }

    let (config, engine) = engine_from(config_path.as_ref(), top_k)?;
    let count = count.unwrap_or(config.question_count);

    let outcome = engine.generate(&text, count).await?;
    eprintln!("{}", outcome_message(&outcome));

    if let GenerationOutcome::Generated { questions, .. } = &outcome {
        match format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(questions)?),
            _ => println!("{}", question_table(questions)),
        }
    } else if format == "json" {
        println!("[]");
    }

    Ok(())
}

fn question_table(questions: &[Question]) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Type", "Question", "Answer"]);
    for (i, q) in questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(q.kind.label()),
            Cell::new(&q.question),
            Cell::new(&q.answer),
        ]);
    }
    table
}
