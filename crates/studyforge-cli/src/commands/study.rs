//! The `studyforge study` command: an interactive question session.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use studyforge_core::engine::StudyEngine;
use studyforge_core::evaluate::understanding_percent;
use studyforge_core::model::{AnswerMode, Question};

use super::{engine_from, outcome_message, read_input, validate_count, NO_INPUT_MESSAGE};

pub const NOT_SUITABLE_MESSAGE: &str = "Fill-in-the-blank not suitable for this sentence.";

pub async fn execute(
    input: PathBuf,
    count: Option<usize>,
    mode: Option<AnswerMode>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if let Some(count) = count {
        validate_count(count)?;
    }
    anyhow::ensure!(
        input != PathBuf::from("-"),
        "study reads answers from stdin; pass the notes as a file"
    );

    let text = read_input(&input)?;
    if text.trim().is_empty() {
        eprintln!("{NO_INPUT_MESSAGE}");
        return Ok(());
    }

    let (config, engine) = engine_from(config_path.as_ref(), None)?;
    let count = count.unwrap_or(config.question_count);
    let mode = mode.unwrap_or(config.answer_mode);

    let outcome = engine.generate(&text, count).await?;
    eprintln!("{}", outcome_message(&outcome));
    let questions = outcome.into_questions();
    if questions.is_empty() {
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut answers = stdin.lock();
    let mut out = std::io::stdout();
    let summary = run_session(&engine, &questions, mode, &mut answers, &mut out).await?;
    writeln!(out, "{}", summary.describe(mode))?;
    Ok(())
}

/// Tally of a finished session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SessionSummary {
    pub answered: usize,
    pub correct: usize,
    pub skipped: usize,
    pub total_score: f64,
}

impl SessionSummary {
    pub fn describe(&self, mode: AnswerMode) -> String {
        match mode {
            AnswerMode::ShortAnswer => {
                let mean = if self.answered == 0 {
                    0.0
                } else {
                    self.total_score / self.answered as f64
                };
                format!(
                    "Answered {} questions, average understanding {}%.",
                    self.answered,
                    understanding_percent(mean)
                )
            }
            AnswerMode::FillBlank => format!(
                "Answered {} questions, {} correct.",
                self.answered, self.correct
            ),
        }
    }
}

/// Ask each question in turn, reading one answer line per question.
///
/// Stops early when the answer stream ends.
pub async fn run_session<R: BufRead, W: Write>(
    engine: &StudyEngine,
    questions: &[Question],
    mode: AnswerMode,
    answers: &mut R,
    out: &mut W,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();

    for (i, question) in questions.iter().enumerate() {
        writeln!(out, "\nQ{} ({})", i + 1, question.kind.label())?;

        let blank = match mode {
            AnswerMode::ShortAnswer => {
                writeln!(out, "{}", question.question)?;
                None
            }
            AnswerMode::FillBlank => match engine.fill_blank(&question.answer).await? {
                Some(blank) => {
                    writeln!(out, "{}", blank.masked)?;
                    Some(blank)
                }
                None => {
                    writeln!(out, "{NOT_SUITABLE_MESSAGE}")?;
                    writeln!(out, "Answer: {}", question.answer)?;
                    summary.skipped += 1;
                    continue;
                }
            },
        };

        write!(out, "Your answer: ")?;
        out.flush()?;
        let mut line = String::new();
        if answers.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        let answer = line.trim();
        summary.answered += 1;

        match blank {
            None => {
                let score = engine.score_answer(answer, &question.answer).await?;
                summary.total_score += score;
                writeln!(out, "Understanding: {}%", understanding_percent(score))?;
            }
            Some(blank) => {
                if engine.check_fill_blank(answer, &blank.target) {
                    summary.correct += 1;
                    writeln!(out, "Correct")?;
                } else {
                    writeln!(out, "Incorrect")?;
                }
            }
        }
        writeln!(out, "Answer: {}", question.answer)?;
    }

    Ok(summary)
}
