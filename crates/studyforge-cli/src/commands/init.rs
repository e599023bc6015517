//! The `studyforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studyforge.toml").exists() {
        println!("studyforge.toml already exists, skipping.");
    } else {
        std::fs::write("studyforge.toml", SAMPLE_CONFIG)?;
        println!("Created studyforge.toml");
    }

    println!("\nNext steps:");
    println!("  1. Start an embedding backend (e.g. `ollama pull all-minilm`)");
    println!("  2. Point [analyzer] at your syntactic analysis service");
    println!("  3. Run: studyforge generate --input notes.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studyforge configuration

top_k = 10
question_count = 5
answer_mode = "short-answer"

[embedder]
type = "ollama"
base_url = "http://localhost:11434"
model = "all-minilm"

# [embedder]
# type = "openai"
# api_key = "${OPENAI_API_KEY}"
# model = "text-embedding-3-small"

[analyzer]
type = "http"
url = "http://localhost:8000/analyze"
"#;
