//! HTTP plumbing shared by the service adapters.

use std::time::Duration;

use anyhow::Context;
use reqwest::Response;

use studyforge_core::error::ProviderError;

/// Build a client with the given request timeout.
pub(crate) fn build_client(timeout_secs: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Map a transport failure to a [`ProviderError`].
pub(crate) fn send_error(err: reqwest::Error, timeout_secs: u64, unreachable: &str) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else if err.is_connect() {
        ProviderError::NetworkError(unreachable.to_string())
    } else {
        ProviderError::NetworkError(err.to_string())
    }
}

/// Turn non-success statuses into typed errors; pass successes through.
pub(crate) async fn check_status(response: Response, model: &str) -> Result<Response, ProviderError> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    match status {
        429 => {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                .saturating_mul(1000);
            Err(ProviderError::RateLimited { retry_after_ms })
        }
        401 | 403 => {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::AuthenticationFailed(body))
        }
        404 => Err(ProviderError::ModelNotFound(model.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ProviderError::ApiError {
                status,
                message: body,
            })
        }
    }
}
