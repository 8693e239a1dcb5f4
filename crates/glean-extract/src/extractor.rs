//! Core SchemaExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::parser::{parse_requirements, requirements_schema_document};
use crate::prompt::{requirement_prompt, PromptBuilder};
use glean_domain::{
    ExtractionRequirements, FieldSpec, Record, SchemaDocument, StructuredProvider,
};
use glean_schema::GeneratedSchema;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns text documents into structured records against a schema derived
/// once at construction.
///
/// The schema is built exactly once per extractor and reused for every
/// `extract` call, so all records in a batch share one shape. Nothing is
/// mutated after construction; a failed extraction does not poison the
/// extractor.
pub struct SchemaExtractor {
    provider: Arc<dyn StructuredProvider>,
    requirements: ExtractionRequirements,
    schema: GeneratedSchema,
    document: SchemaDocument,
    config: ExtractorConfig,
}

impl SchemaExtractor {
    /// Build an extractor by inferring requirements from a natural-language
    /// description. Makes one structured call to the provider.
    pub async fn from_description(
        description: &str,
        provider: Arc<dyn StructuredProvider>,
    ) -> Result<Self, ExtractError> {
        Self::from_description_with_config(description, provider, ExtractorConfig::default()).await
    }

    /// [`from_description`](Self::from_description) with explicit config
    pub async fn from_description_with_config(
        description: &str,
        provider: Arc<dyn StructuredProvider>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Configuration)?;

        if description.trim().is_empty() {
            return Err(ExtractError::SchemaInference(
                "description is empty".to_string(),
            ));
        }

        info!("Inferring extraction requirements from description");

        let prompt = requirement_prompt(description);
        let schema_doc = requirements_schema_document();

        let response = timeout(
            config.request_timeout(),
            provider.generate_structured(&prompt, &schema_doc),
        )
        .await
        .map_err(|_| ExtractError::Timeout)?
        .map_err(|e| ExtractError::SchemaInference(e.to_string()))?;

        let requirements = parse_requirements(&response)?;
        Self::from_requirements_with_config(requirements, provider, config)
    }

    /// Build an extractor from hand-built requirements. No network call.
    pub fn from_requirements(
        requirements: ExtractionRequirements,
        provider: Arc<dyn StructuredProvider>,
    ) -> Result<Self, ExtractError> {
        Self::from_requirements_with_config(requirements, provider, ExtractorConfig::default())
    }

    /// [`from_requirements`](Self::from_requirements) with explicit config
    pub fn from_requirements_with_config(
        requirements: ExtractionRequirements,
        provider: Arc<dyn StructuredProvider>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractError> {
        config.validate().map_err(ExtractError::Configuration)?;

        let schema = GeneratedSchema::from_requirements(&requirements)?;
        let document = schema.to_document();

        info!(
            "Extractor ready: schema '{}' with {} fields, model '{}'",
            schema.name(),
            schema.fields().len(),
            provider.model_name()
        );

        Ok(Self {
            provider,
            requirements,
            schema,
            document,
            config,
        })
    }

    /// The resolved requirements
    pub fn requirements(&self) -> &ExtractionRequirements {
        &self.requirements
    }

    /// Field specifications in schema order
    pub fn fields(&self) -> &[FieldSpec] {
        self.schema.fields()
    }

    /// Field names in schema order
    pub fn field_names(&self) -> Vec<&str> {
        self.schema.field_names()
    }

    /// The JSON Schema document for the generated schema, derivable on
    /// demand for external tooling
    pub fn json_schema(&self) -> Value {
        self.schema.json_schema()
    }

    /// The model identifier the underlying provider calls
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Extract one record from a document.
    ///
    /// One outbound provider call; the returned value is defensively
    /// re-validated against the generated schema.
    pub async fn extract_one(&self, document: &str) -> Result<Record, ExtractError> {
        let char_count = document.chars().count();
        if char_count > self.config.max_document_chars {
            return Err(ExtractError::DocumentTooLong(
                char_count,
                self.config.max_document_chars,
            ));
        }

        let input = PromptBuilder::new(self.schema.fields(), document).build();
        debug!("Extraction input length: {} chars", input.len());

        let response = timeout(
            self.config.request_timeout(),
            self.provider.generate_structured(&input, &self.document),
        )
        .await
        .map_err(|_| ExtractError::Timeout)??;

        let record = self.schema.validate_record(&response)?;
        Ok(record)
    }

    /// Extract records from multiple documents, sequentially and in input
    /// order.
    ///
    /// Batch policy: **continue past failures**. Each document's outcome is
    /// reported in its input position; one document failing never discards
    /// the records already extracted or stops the rest of the batch.
    pub async fn extract<S: AsRef<str>>(&self, documents: &[S]) -> Vec<Result<Record, ExtractError>> {
        let mut results = Vec::with_capacity(documents.len());

        for (index, document) in documents.iter().enumerate() {
            match self.extract_one(document.as_ref()).await {
                Ok(record) => results.push(Ok(record)),
                Err(e) => {
                    warn!("Extraction failed for document {}: {}", index, e);
                    results.push(Err(e));
                }
            }
        }

        info!(
            "Batch complete: {}/{} documents extracted",
            results.iter().filter(|r| r.is_ok()).count(),
            documents.len()
        );

        results
    }
}

/// Complete workflow from a natural-language description to structured
/// records: infer requirements, build the schema, extract every document.
///
/// Prefer building a [`SchemaExtractor`] directly when processing multiple
/// batches with the same schema; this helper re-infers requirements each
/// time it is called.
pub async fn extraction_workflow<S: AsRef<str>>(
    description: &str,
    documents: &[S],
    provider: Arc<dyn StructuredProvider>,
) -> Result<Vec<Result<Record, ExtractError>>, ExtractError> {
    let extractor = SchemaExtractor::from_description(description, provider).await?;
    Ok(extractor.extract(documents).await)
}
