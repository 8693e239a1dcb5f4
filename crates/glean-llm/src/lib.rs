//! Glean LLM Provider Layer
//!
//! Provider adapters implementing the `StructuredProvider` trait from
//! `glean-domain`, one per supported vendor, plus an explicit registry for
//! selecting them by name.
//!
//! # Providers
//!
//! - `MockProvider`: deterministic mock for testing, no network
//! - `OpenAiProvider`: OpenAI chat completions with strict `json_schema`
//! - `AzureOpenAiProvider`: Azure OpenAI deployments (endpoint + deployment)
//! - `AnthropicProvider`: Anthropic messages API via a forced tool
//! - `GoogleProvider`: Gemini `generateContent` with a response schema
//!
//! # Examples
//!
//! ```
//! use glean_llm::{MockProvider, ProviderConfig, ProviderRegistry};
//! use serde_json::json;
//!
//! let provider = MockProvider::new(json!({"name": "Alice"}));
//! assert_eq!(provider.call_count(), 0);
//!
//! let registry = ProviderRegistry::with_defaults();
//! assert!(registry.is_registered("openai"));
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod azure;
pub mod config;
pub mod google;
mod http;
pub mod openai;
pub mod registry;

use async_trait::async_trait;
use glean_domain::{ProviderError, SchemaDocument, StructuredProvider};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub use anthropic::AnthropicProvider;
pub use azure::AzureOpenAiProvider;
pub use config::{ProviderConfig, ProviderKind};
pub use google::GoogleProvider;
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;

/// Mock provider for deterministic testing
///
/// Returns pre-configured JSON values without making any network calls and
/// counts invocations, so tests can assert that no call (or exactly one call)
/// happened.
///
/// # Examples
///
/// ```
/// use glean_llm::MockProvider;
/// use serde_json::json;
///
/// let mut provider = MockProvider::new(json!({"name": "Alice", "age": 25}));
/// provider.add_response("Bob is 30", json!({"name": "Bob", "age": 30}));
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Value,
    // Fragment lists keep insertion order; the first configured match wins
    responses: Arc<Mutex<Vec<(String, Value)>>>,
    failures: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a mock returning a fixed value for every input
    pub fn new(response: Value) -> Self {
        Self {
            default_response: response,
            responses: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for inputs containing the given fragment.
    ///
    /// When several fragments match one input, the earliest-added wins.
    pub fn add_response(&mut self, input_fragment: impl Into<String>, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .push((input_fragment.into(), response));
    }

    /// Configure an error for inputs containing the given fragment
    pub fn add_error(&mut self, input_fragment: impl Into<String>, message: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .push((input_fragment.into(), message.into()));
    }

    /// How many times `generate_structured` has been called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count to zero
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

#[async_trait]
impl StructuredProvider for MockProvider {
    async fn generate_structured(
        &self,
        input: &str,
        _schema: &SchemaDocument,
    ) -> Result<Value, ProviderError> {
        *self.call_count.lock().unwrap() += 1;

        let failures = self.failures.lock().unwrap();
        if let Some(message) = failures
            .iter()
            .find(|(fragment, _)| input.contains(fragment.as_str()))
            .map(|(_, message)| message.clone())
        {
            return Err(ProviderError::InvalidResponse(message));
        }
        drop(failures);

        let responses = self.responses.lock().unwrap();
        let matched = responses
            .iter()
            .find(|(fragment, _)| input.contains(fragment.as_str()))
            .map(|(_, response)| response.clone());

        Ok(matched.unwrap_or_else(|| self.default_response.clone()))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
