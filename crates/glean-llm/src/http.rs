//! Shared HTTP plumbing for provider adapters

use glean_domain::ProviderError;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default request timeout (structured calls on large documents are slow)
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts before giving up
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// Build the reqwest client all adapters share the settings of
pub(crate) fn build_client() -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::Communication(format!("Failed to build HTTP client: {}", e)))
}

/// What to do with a non-success HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusAction {
    /// 2xx, hand the body to the caller
    Accept,
    /// 429 or 5xx, worth another attempt
    Retry,
    /// Other 4xx, retrying cannot help
    Fail,
    /// 404, the model or deployment does not exist
    ModelNotFound,
}

/// Classify a response status for the retry loop.
///
/// A 404 is treated as model-not-found since all adapters embed the model or
/// deployment in the URL or body.
pub(crate) fn classify_status(status: reqwest::StatusCode) -> StatusAction {
    if status.is_success() {
        StatusAction::Accept
    } else if status == reqwest::StatusCode::NOT_FOUND {
        StatusAction::ModelNotFound
    } else if status.as_u16() == 429 || status.is_server_error() {
        StatusAction::Retry
    } else {
        StatusAction::Fail
    }
}

/// Exponential backoff before the given retry attempt (1s, 2s, 4s, ...)
pub(crate) fn backoff_delay(attempts: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempts.saturating_sub(1)))
}

/// Send a request, retrying transport failures and retryable statuses with
/// exponential backoff, bounded by `max_retries` attempts.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    max_retries: u32,
    model: &str,
) -> Result<Value, ProviderError> {
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        let attempt = request.try_clone().ok_or_else(|| {
            ProviderError::Communication("Request body is not retryable".to_string())
        })?;

        match attempt.send().await {
            Ok(response) => {
                let status = response.status();
                match classify_status(status) {
                    StatusAction::Accept => {
                        return response.json::<Value>().await.map_err(|e| {
                            ProviderError::InvalidResponse(format!(
                                "Failed to parse response body: {}",
                                e
                            ))
                        });
                    }
                    StatusAction::ModelNotFound => {
                        return Err(ProviderError::ModelNotAvailable(model.to_string()));
                    }
                    action => {
                        let body = response.text().await.unwrap_or_default();
                        let error = ProviderError::Api {
                            status: status.as_u16(),
                            message: body,
                        };
                        if action == StatusAction::Fail {
                            return Err(error);
                        }
                        warn!(
                            "Retryable provider error (attempt {}): {}",
                            attempts + 1,
                            error
                        );
                        last_error = Some(error);
                    }
                }
            }
            Err(e) => {
                warn!("Request failed (attempt {}): {}", attempts + 1, e);
                last_error = Some(ProviderError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = backoff_delay(attempts);
            debug!("Backing off {:?} before retry", delay);
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| ProviderError::Communication("Max retries exceeded".to_string())))
}
