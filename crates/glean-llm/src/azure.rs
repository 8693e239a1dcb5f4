//! Azure OpenAI Provider Implementation
//!
//! Same wire shape as the OpenAI adapter, but addressed through an Azure
//! resource endpoint and deployment name, authenticated with an `api-key`
//! header. Endpoint and deployment have no defaults: if neither an explicit
//! value nor an environment variable provides them, construction fails.

use crate::config::{self, ProviderConfig};
use crate::http;
use crate::openai::{parse_chat_completion, response_format};
use async_trait::async_trait;
use glean_domain::{ProviderError, SchemaDocument, StructuredProvider};
use serde_json::{json, Value};
use tracing::debug;

/// Default Azure OpenAI API version
pub const DEFAULT_API_VERSION: &str = "2024-10-21";

/// Azure OpenAI deployments with structured output
pub struct AzureOpenAiProvider {
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl AzureOpenAiProvider {
    /// Create a provider with explicit settings
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            endpoint: endpoint.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_key: api_key.into(),
            client: http::build_client()?,
            max_retries: http::DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a provider from options and the `AZURE_*` environment.
    ///
    /// Key: `AZURE_OPENAI_API_KEY` or `AZURE_API_KEY`. Endpoint:
    /// `AZURE_OPENAI_ENDPOINT` or `AZURE_API_BASE`. Deployment:
    /// `AZURE_DEPLOYMENT` (or the `model` option). Any of the three missing
    /// is a configuration error raised before any network call.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::from_config_with_env(config, &config::process_env)
    }

    pub(crate) fn from_config_with_env(
        config: &ProviderConfig,
        env: config::EnvLookup<'_>,
    ) -> Result<Self, ProviderError> {
        let api_key = config::require(
            config.api_key.as_ref(),
            &["AZURE_OPENAI_API_KEY", "AZURE_API_KEY"],
            env,
            "Azure OpenAI API key",
        )?;
        let endpoint = config::require(
            config.endpoint.as_ref(),
            &["AZURE_OPENAI_ENDPOINT", "AZURE_API_BASE"],
            env,
            "Azure OpenAI endpoint",
        )?;
        // On Azure the deployment name is the model identifier
        let deployment = config::require(
            config.deployment.as_ref().or(config.model.as_ref()),
            &["AZURE_DEPLOYMENT"],
            env,
            "Azure deployment name",
        )?;
        let api_version = config
            .api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            deployment,
            api_version,
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

#[async_trait]
impl StructuredProvider for AzureOpenAiProvider {
    async fn generate_structured(
        &self,
        input: &str,
        schema: &SchemaDocument,
    ) -> Result<Value, ProviderError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        );
        let body = json!({
            "messages": [{"role": "user", "content": input}],
            "response_format": response_format(schema),
        });

        debug!(
            "Azure structured call: deployment={}, schema={}",
            self.deployment, schema.name
        );

        let request = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body);

        let response = http::send_with_retry(request, self.max_retries, &self.deployment).await?;
        parse_chat_completion(&response)
    }

    fn model_name(&self) -> &str {
        &self.deployment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_endpoint_is_configuration_error() {
        let config = ProviderConfig::new()
            .with_api_key("azure-key")
            .with_deployment("gpt-4o");
        let result = AzureOpenAiProvider::from_config_with_env(&config, &no_env);
        match result {
            Err(ProviderError::Configuration(message)) => {
                assert!(message.contains("endpoint"), "message: {}", message);
            }
            other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_deployment_is_configuration_error() {
        let config = ProviderConfig::new()
            .with_api_key("azure-key")
            .with_endpoint("https://example.openai.azure.com");
        let result = AzureOpenAiProvider::from_config_with_env(&config, &no_env);
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_model_option_supplies_deployment() {
        let config = ProviderConfig::new()
            .with_api_key("azure-key")
            .with_endpoint("https://example.openai.azure.com/")
            .with_model("gpt-4o");
        let provider = AzureOpenAiProvider::from_config_with_env(&config, &no_env).unwrap();
        assert_eq!(provider.model_name(), "gpt-4o");
        // Trailing slash trimmed so the URL joins cleanly
        assert_eq!(provider.endpoint, "https://example.openai.azure.com");
    }

    #[test]
    fn test_env_resolution() {
        let env = |key: &str| match key {
            "AZURE_API_KEY" => Some("env-key".to_string()),
            "AZURE_API_BASE" => Some("https://env.openai.azure.com".to_string()),
            "AZURE_DEPLOYMENT" => Some("gpt-4".to_string()),
            _ => None,
        };
        let provider =
            AzureOpenAiProvider::from_config_with_env(&ProviderConfig::new(), &env).unwrap();
        assert_eq!(provider.model_name(), "gpt-4");
        assert_eq!(provider.api_version, DEFAULT_API_VERSION);
    }
}
