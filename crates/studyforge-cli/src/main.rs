//! studyforge CLI: turn study notes into self-assessment questions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use studyforge_core::model::AnswerMode;

mod commands;

#[derive(Parser)]
#[command(
    name = "studyforge",
    version,
    about = "Self-assessment questions from study notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate questions from study notes
    Generate {
        /// Notes file, or "-" for stdin
        #[arg(long)]
        input: PathBuf,

        /// Number of questions (1-10, default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Sentences kept by the ranker (default from config)
        #[arg(long)]
        top_k: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Answer generated questions interactively
    Study {
        /// Notes file
        #[arg(long)]
        input: PathBuf,

        /// Number of questions (1-10, default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Answer mode: short-answer, fill-blank (default from config)
        #[arg(long)]
        mode: Option<AnswerMode>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a short answer against a reference sentence
    Score {
        /// Reference sentence
        #[arg(long)]
        reference: String,

        /// The learner's answer
        #[arg(long)]
        answer: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the fill-in-the-blank form of a sentence
    Blank {
        /// Sentence to mask
        #[arg(long)]
        sentence: String,

        /// Check this answer against the blank
        #[arg(long)]
        answer: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studyforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            count,
            top_k,
            format,
            config,
        } => commands::generate::execute(input, count, top_k, format, config).await,
        Commands::Study {
            input,
            count,
            mode,
            config,
        } => commands::study::execute(input, count, mode, config).await,
        Commands::Score {
            reference,
            answer,
            config,
        } => commands::score::execute(reference, answer, config).await,
        Commands::Blank {
            sentence,
            answer,
            config,
        } => commands::blank::execute(sentence, answer, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
