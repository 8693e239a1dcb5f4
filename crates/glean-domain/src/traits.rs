//! Trait definitions for external interactions
//!
//! These traits define the boundary between domain logic and infrastructure.
//! Provider implementations live in `glean-llm`.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde_json::Value;

/// One extracted record: a plain mapping of field name to value
pub type Record = serde_json::Map<String, Value>;

/// A named JSON Schema handed to a provider's structured-output API.
///
/// The `schema` value is a standard JSON Schema object. Adapters translate it
/// into whatever their vendor's API expects (strict response formats, forced
/// tools, response schemas).
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// Schema name, used where a vendor requires one (e.g. OpenAI json_schema)
    pub name: String,

    /// The JSON Schema object itself
    pub schema: Value,
}

impl SchemaDocument {
    /// Create a schema document
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

/// Trait for LLM provider structured-output operations
///
/// Implemented by the infrastructure layer (`glean-llm`). An implementation
/// accepts an input text and a target schema and returns a JSON value the
/// vendor claims conforms to that schema. Callers re-validate defensively.
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Send `input` to the model and return a value conforming to `schema`
    async fn generate_structured(
        &self,
        input: &str,
        schema: &SchemaDocument,
    ) -> Result<Value, ProviderError>;

    /// The resolved model identifier this provider calls
    fn model_name(&self) -> &str;
}
