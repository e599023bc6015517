//! OpenAI-compatible embedding provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use studyforge_core::error::ProviderError;
use studyforge_core::traits::Embedder;

use crate::http::{build_client, check_status, send_error};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Embeddings from the OpenAI `/v1/embeddings` endpoint or a compatible server.
pub struct OpenAiEmbedder {
    api_key: String,
    base_url: String,
    model: String,
    dimensions: Option<usize>,
    client: reqwest::Client,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        model: Option<String>,
        dimensions: Option<usize>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!api_key.trim().is_empty(), "missing OpenAI API key");

        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            dimensions,
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn name(&self) -> &str {
        "openai"
    }

    async fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text]).await?;
        vectors.pop().ok_or_else(|| {
            ProviderError::InvalidResponse("OpenAI returned no embedding".into()).into()
        })
    }

    #[instrument(skip(self, texts), fields(model = %self.model, inputs = texts.len()))]
    async fn embed_batch(&self, texts: &[&str]) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
            dimensions: self.dimensions,
        };

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                send_error(
                    e,
                    DEFAULT_TIMEOUT_SECS,
                    &format!("OpenAI endpoint not reachable at {}", self.base_url),
                )
            })?;
        let response = check_status(response, &self.model).await?;

        let mut parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        if parsed.data.len() != texts.len() {
            return Err(ProviderError::InvalidResponse(format!(
                "OpenAI returned {} embeddings for {} inputs",
                parsed.data.len(),
                texts.len()
            ))
            .into());
        }
        parsed.data.sort_by_key(|entry| entry.index);
        Ok(parsed.data.into_iter().map(|entry| entry.embedding).collect())
    }
}
