//! OpenAI Provider Implementation
//!
//! Talks to the chat completions API with a strict `json_schema` response
//! format, so the service itself enforces the extraction schema.
//!
//! # Examples
//!
//! ```no_run
//! use glean_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o").unwrap();
//! ```

use crate::config::{self, ProviderConfig, DEFAULT_OPENAI_MODEL};
use crate::http;
use async_trait::async_trait;
use glean_domain::{ProviderError, SchemaDocument, StructuredProvider};
use serde_json::{json, Value};
use tracing::debug;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// OpenAI chat completions with structured output
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl OpenAiProvider {
    /// Create a provider with an explicit key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: http::build_client()?,
            max_retries: http::DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a provider from options, falling back to `OPENAI_API_KEY` and
    /// the default model. Fails with a configuration error before any
    /// network call when no key can be resolved.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::from_config_with_env(config, &config::process_env)
    }

    pub(crate) fn from_config_with_env(
        config: &ProviderConfig,
        env: config::EnvLookup<'_>,
    ) -> Result<Self, ProviderError> {
        let api_key = config::require(
            config.api_key.as_ref(),
            &["OPENAI_API_KEY"],
            env,
            "OpenAI API key",
        )?;
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        let endpoint = config
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            endpoint,
            model,
            api_key,
            client: http::build_client()?,
            max_retries: http::DEFAULT_MAX_RETRIES,
        })
    }

    /// Override the endpoint (OpenAI-compatible gateways)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Build the `response_format` body fragment for a schema document
pub(crate) fn response_format(schema: &SchemaDocument) -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": schema.name,
            "strict": true,
            "schema": schema.schema,
        }
    })
}

/// Pull the structured value out of a chat completions response.
///
/// Shared with the Azure adapter, which returns the same shape.
pub(crate) fn parse_chat_completion(response: &Value) -> Result<Value, ProviderError> {
    let message = response["choices"]
        .get(0)
        .map(|choice| &choice["message"])
        .ok_or_else(|| ProviderError::InvalidResponse("Response has no choices".to_string()))?;

    if let Some(refusal) = message["refusal"].as_str() {
        return Err(ProviderError::InvalidResponse(format!(
            "Model refused the request: {}",
            refusal
        )));
    }

    let content = message["content"].as_str().ok_or_else(|| {
        ProviderError::InvalidResponse("Message has no text content".to_string())
    })?;

    serde_json::from_str(content).map_err(|e| {
        ProviderError::InvalidResponse(format!("Content is not valid JSON: {}", e))
    })
}

#[async_trait]
impl StructuredProvider for OpenAiProvider {
    async fn generate_structured(
        &self,
        input: &str,
        schema: &SchemaDocument,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": input}],
            "response_format": response_format(schema),
        });

        debug!("OpenAI structured call: model={}, schema={}", self.model, schema.name);

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body);

        let response = http::send_with_retry(request, self.max_retries, &self.model).await?;
        parse_chat_completion(&response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
