//! HTTP client for a dependency-parsing service.
//!
//! The service receives `{"text": "<sentence>"}` and answers with
//!
//! ```json
//! {
//!   "tokens": [{"text": "Water", "lemma": "water", "dep_label": "nsubj"}],
//!   "noun_chunks": [{"text": "Water", "head_dep_label": "nsubj"}]
//! }
//! ```
//!
//! which is exactly the serde form of [`Analysis`]. A thin spaCy wrapper
//! (`token.lemma_`, `token.dep_`, `chunk.root.dep_`) satisfies it.

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use studyforge_core::error::ProviderError;
use studyforge_core::traits::{Analysis, SyntacticAnalyzer};

use crate::http::{build_client, check_status, send_error};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Syntactic analysis over HTTP.
pub struct HttpAnalyzer {
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    pub fn new(url: &str, api_key: Option<String>) -> anyhow::Result<Self> {
        anyhow::ensure!(!url.trim().is_empty(), "missing analyzer URL");
        Ok(Self {
            url: url.trim().to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: build_client(DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl SyntacticAnalyzer for HttpAnalyzer {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, sentence), fields(url = %self.url))]
    async fn analyze(&self, sentence: &str) -> anyhow::Result<Analysis> {
        let mut req = self
            .client
            .post(&self.url)
            .json(&AnalyzeRequest { text: sentence });
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let response = req.send().await.map_err(|e| {
            send_error(
                e,
                DEFAULT_TIMEOUT_SECS,
                &format!("analyzer not reachable at {}", self.url),
            )
        })?;
        let response = check_status(response, "analyzer").await?;

        let analysis: Analysis = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse analysis: {e}"))
        })?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn parses_analysis() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_json(serde_json::json!({"text": "Water boils."})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tokens": [
                    {"text": "Water", "lemma": "water", "dep_label": "nsubj"},
                    {"text": "boils", "lemma": "boil", "dep_label": "ROOT"},
                    {"text": ".", "lemma": ".", "dep_label": "punct"}
                ],
                "noun_chunks": [{"text": "Water", "head_dep_label": "nsubj"}]
            })))
            .mount(&server)
            .await;

        let analyzer = HttpAnalyzer::new(&format!("{}/analyze", server.uri()), None).unwrap();
        let analysis = analyzer.analyze("Water boils.").await.unwrap();
        assert_eq!(analysis.tokens.len(), 3);
        assert!(analysis.tokens[1].is_root());
        assert!(analysis.noun_chunks[0].is_subject());
    }

    #[tokio::test]
    async fn sends_bearer_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let analyzer = HttpAnalyzer::new(&server.uri(), Some("secret".into())).unwrap();
        let analysis = analyzer.analyze("Hi.").await.unwrap();
        assert_eq!(analysis, Analysis::default());
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let analyzer = HttpAnalyzer::new(&server.uri(), None).unwrap();
        let err = analyzer.analyze("Hi.").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("loading model"))
            .mount(&server)
            .await;

        let analyzer = HttpAnalyzer::new(&server.uri(), None).unwrap();
        let err = analyzer.analyze("Hi.").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
