//! Google Gemini Provider Implementation
//!
//! Uses `generateContent` with a JSON response MIME type and a
//! `responseSchema`. Gemini's schema dialect is an OpenAPI subset, not JSON
//! Schema, so the document is converted: uppercase type names, a `nullable`
//! flag instead of `["T", "null"]` unions, and no `additionalProperties`.

use crate::config::{self, ProviderConfig, DEFAULT_GOOGLE_MODEL};
use crate::http;
use async_trait::async_trait;
use glean_domain::{ProviderError, SchemaDocument, StructuredProvider};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini with schema-constrained JSON output
pub struct GoogleProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl GoogleProvider {
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

    /// Create a provider from options, falling back to `GOOGLE_API_KEY` and
    /// the default model
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::from_config_with_env(config, &config::process_env)
    }

    pub(crate) fn from_config_with_env(
        config: &ProviderConfig,
        env: config::EnvLookup<'_>,
    ) -> Result<Self, ProviderError> {
        let api_key = config::require(
            config.api_key.as_ref(),
            &["GOOGLE_API_KEY"],
            env,
            "Google API key",
        )?;
        let model = config
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_GOOGLE_MODEL.to_string());
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

/// Convert a JSON Schema value into Gemini's response schema dialect
fn to_gemini_schema(schema: &Value) -> Value {
    let object = match schema.as_object() {
        Some(object) => object,
        None => return schema.clone(),
    };

    let mut out = Map::new();

    let (type_name, nullable) = schema_type(object.get("type"));
    if let Some(name) = type_name {
        out.insert("type".to_string(), Value::String(name));
    }
    if nullable {
        out.insert("nullable".to_string(), Value::Bool(true));
    }

    if let Some(description) = object.get("description") {
        out.insert("description".to_string(), description.clone());
    }

    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        let converted: Map<String, Value> = properties
            .iter()
            .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
            .collect();
        out.insert("properties".to_string(), Value::Object(converted));
    }

    if let Some(required) = object.get("required") {
        out.insert("required".to_string(), required.clone());
    }

    if let Some(items) = object.get("items") {
        out.insert("items".to_string(), to_gemini_schema(items));
    }

    Value::Object(out)
}

/// Resolve the JSON Schema `type` keyword (string or nullable union) into a
/// Gemini type name plus nullability
fn schema_type(type_value: Option<&Value>) -> (Option<String>, bool) {
    match type_value {
        Some(Value::String(name)) => (Some(gemini_type_name(name)), false),
        Some(Value::Array(names)) => {
            let nullable = names.iter().any(|n| n == "null");
            let base = names
                .iter()
                .filter_map(Value::as_str)
                .find(|n| *n != "null")
                .map(gemini_type_name);
            (base, nullable)
        }
        _ => (None, false),
    }
}

fn gemini_type_name(json_type: &str) -> String {
    match json_type {
        "string" => "STRING",
        "integer" => "INTEGER",
        "number" => "NUMBER",
        "boolean" => "BOOLEAN",
        "array" => "ARRAY",
        "object" => "OBJECT",
        other => other,
    }
    .to_string()
}

/// Pull the JSON payload out of a `generateContent` response
fn parse_generate_content(response: &Value) -> Result<Value, ProviderError> {
    let text = response["candidates"]
        .get(0)
        .and_then(|candidate| candidate["content"]["parts"].get(0))
        .and_then(|part| part["text"].as_str())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("Response has no candidate text part".to_string())
        })?;

    serde_json::from_str(text).map_err(|e| {
        ProviderError::InvalidResponse(format!("Candidate text is not valid JSON: {}", e))
    })
}

#[async_trait]
impl StructuredProvider for GoogleProvider {
    async fn generate_structured(
        &self,
        input: &str,
        schema: &SchemaDocument,
    ) -> Result<Value, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": input}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(&schema.schema),
            }
        });

        debug!(
            "Google structured call: model={}, schema={}",
            self.model, schema.name
        );

        let request = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        let response = http::send_with_retry(request, self.max_retries, &self.model).await?;
        parse_generate_content(&response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
