//! Ollama (local model) embedding provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use studyforge_core::error::ProviderError;
use studyforge_core::traits::Embedder;

use crate::http::{build_client, check_status, send_error};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "all-minilm";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Embeddings from a local Ollama instance.
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaEmbedder {
    pub fn new(base_url: &str, model: &str) -> anyhow::Result<Self> {
        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };
        let model = if model.is_empty() { DEFAULT_MODEL } else { model };

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or_else(|| {
            ProviderError::InvalidResponse("Ollama returned no embedding".into()).into()
        })
    }

    #[instrument(skip(self, texts), fields(model = %self.model, inputs = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                send_error(
                    e,
                    DEFAULT_TIMEOUT_SECS,
                    &format!(
                        "Ollama not reachable at {}. Is it running? Start with: ollama serve",
                        self.base_url
                    ),
                )
            })?;
        let response = check_status(response, &self.model).await?;

        let api_response: OllamaEmbedResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        if api_response.embeddings.len() != texts.len() {
            return Err(ProviderError::InvalidResponse(format!(
                "Ollama returned {} embeddings for {} inputs",
                api_response.embeddings.len(),
                texts.len()
            ))
            .into());
        }
        Ok(api_response.embeddings)
    }
}
