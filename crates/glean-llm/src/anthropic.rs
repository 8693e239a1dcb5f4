//! Anthropic Provider Implementation
//!
//! The messages API has no `response_format`; schema enforcement is done by
//! declaring a single tool whose `input_schema` is the extraction schema and
//! forcing the model to call it. The structured value is the `tool_use`
//! block's input.

use crate::config::{self, ProviderConfig, DEFAULT_ANTHROPIC_MODEL};
use crate::http;
use async_trait::async_trait;
use glean_domain::{ProviderError, SchemaDocument, StructuredProvider};
use serde_json::{json, Value};
use tracing::debug;

/// Default Anthropic API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version header value required by the messages API
pub const API_VERSION: &str = "2023-06-01";

/// Upper bound on response tokens for a structured call
const MAX_TOKENS: u32 = 4096;

/// Anthropic messages API with tool-forced structured output
pub struct AnthropicProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl AnthropicProvider {
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

    /// Create a provider from options, falling back to `ANTHROPIC_API_KEY`
    /// and the default model
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::from_config_with_env(config, &config::process_env)
    }

    pub(crate) fn from_config_with_env(
        config: &ProviderConfig,
        env: config::EnvLookup<'_>,
    ) -> Result<Self, ProviderError> {
        let api_key = config::require(
            config.api_key.as_ref(),
            &["ANTHROPIC_API_KEY"],
            env,
            "Anthropic API key",
        )?;
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string());
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

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Pull the forced tool call's input out of a messages response
fn parse_tool_use(response: &Value, tool_name: &str) -> Result<Value, ProviderError> {
    let content = response["content"].as_array().ok_or_else(|| {
        ProviderError::InvalidResponse("Response has no content blocks".to_string())
    })?;

    content
        .iter()
        .find(|block| block["type"] == "tool_use" && block["name"] == tool_name)
        .map(|block| block["input"].clone())
        .ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "Response contains no tool_use block for '{}'",
                tool_name
            ))
        })
}

#[async_trait]
impl StructuredProvider for AnthropicProvider {
    async fn generate_structured(
        &self,
        input: &str,
        schema: &SchemaDocument,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}/v1/messages", self.endpoint);
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": input}],
            "tools": [{
                "name": schema.name,
                "description": "Record the extracted fields from the input.",
                "input_schema": schema.schema,
            }],
            "tool_choice": {"type": "tool", "name": schema.name},
        });

        debug!(
            "Anthropic structured call: model={}, schema={}",
            self.model, schema.name
        );

        let request = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response = http::send_with_retry(request, self.max_retries, &self.model).await?;
        parse_tool_use(&response, &schema.name)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = AnthropicProvider::from_config_with_env(&ProviderConfig::new(), &no_env);
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_default_model() {
        let config = ProviderConfig::new().with_api_key("sk-ant-test");
        let provider = AnthropicProvider::from_config_with_env(&config, &no_env).unwrap();
        assert_eq!(provider.model_name(), DEFAULT_ANTHROPIC_MODEL);
    }

    #[test]
    fn test_parse_tool_use() {
        let response = json!({
            "content": [
                {"type": "text", "text": "Calling the tool."},
                {"type": "tool_use", "name": "Person", "input": {"name": "Alice", "age": 25}},
            ]
        });
        let value = parse_tool_use(&response, "Person").unwrap();
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["age"], 25);
    }

    #[test]
    fn test_parse_missing_tool_use() {
        let response = json!({
            "content": [{"type": "text", "text": "I cannot do that."}]
        });
        assert!(matches!(
            parse_tool_use(&response, "Person"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_wrong_tool_name() {
        let response = json!({
            "content": [{"type": "tool_use", "name": "Other", "input": {}}]
        });
        assert!(parse_tool_use(&response, "Person").is_err());
    }
}
