//! The GeneratedSchema type and JSON Schema emission

use crate::error::SchemaError;
use glean_domain::{ExtractionRequirements, FieldSpec, FieldType, SchemaDocument};
use serde_json::{json, Value};
use std::collections::HashSet;

/// A runtime-built record schema derived from extraction requirements.
///
/// Field order, types, and required flags are fixed at construction, so equal
/// requirements always yield structurally equal schemas. Built at most once
/// per extractor and shared read-only across all extraction calls.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl GeneratedSchema {
    /// Build a schema from requirements.
    ///
    /// Fails with [`SchemaError::EmptyFields`] when there is nothing to
    /// extract, [`SchemaError::DuplicateField`] when two specs share a name,
    /// and a domain error when a field name is not a valid identifier. No
    /// partial schema is ever produced.
    pub fn from_requirements(requirements: &ExtractionRequirements) -> Result<Self, SchemaError> {
        if requirements.fields.is_empty() {
            return Err(SchemaError::EmptyFields);
        }

        let mut seen = HashSet::new();
        for field in &requirements.fields {
            field.validate()?;
            if !seen.insert(field.field_name.as_str()) {
                return Err(SchemaError::DuplicateField(field.field_name.clone()));
            }
        }

        Ok(Self {
            name: sanitize_schema_name(&requirements.use_case_name),
            fields: requirements.fields.clone(),
        })
    }

    /// The sanitized schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field specifications in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field_name.as_str()).collect()
    }

    /// Look up one field specification by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Derive the JSON Schema document for this schema.
    ///
    /// Emitted in the strict style the providers' structured-output modes
    /// expect: every property is listed in `required` and optional fields are
    /// nullable, so an absent value arrives as an explicit `null` rather than
    /// a missing key. `additionalProperties` is always `false`.
    pub fn json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            properties.insert(field.field_name.clone(), property_schema(field));
            required.push(Value::String(field.field_name.clone()));
        }

        json!({
            "type": "object",
            "title": self.name,
            "properties": Value::Object(properties),
            "required": Value::Array(required),
            "additionalProperties": false,
        })
    }

    /// Package the JSON Schema as a named document for a provider call
    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument::new(self.name.clone(), self.json_schema())
    }
}

/// The JSON Schema fragment for a single field
fn property_schema(field: &FieldSpec) -> Value {
    let base_type = field.field_type.json_type();

    let type_value = if field.required {
        Value::String(base_type.to_string())
    } else {
        json!([base_type, "null"])
    };

    let mut prop = serde_json::Map::new();
    prop.insert("type".to_string(), type_value);
    if field.field_type == FieldType::StringList {
        prop.insert("items".to_string(), json!({"type": "string"}));
    }
    if !field.description.is_empty() {
        prop.insert(
            "description".to_string(),
            Value::String(field.description.clone()),
        );
    }

    Value::Object(prop)
}

/// Turn a free-form use-case label into a PascalCase schema name.
///
/// Non-alphanumeric characters split words; an empty result falls back to
/// `Extraction`.
pub fn sanitize_schema_name(label: &str) -> String {
    let mut name = String::new();
    for word in label.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }

    if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let mut fallback = String::from("Extraction");
        fallback.push_str(&name);
        return fallback;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_requirements() -> ExtractionRequirements {
        ExtractionRequirements::new(
            "invoice processing",
            vec![
                FieldSpec::new("invoice_number", FieldType::String, "Invoice ID", true),
                FieldSpec::new("amount", FieldType::Float, "Total in USD", true),
                FieldSpec::new("po_number", FieldType::String, "PO reference", false),
                FieldSpec::new("line_items", FieldType::StringList, "Line items", false),
            ],
        )
    }

    #[test]
    fn test_build_preserves_field_order() {
        let schema = GeneratedSchema::from_requirements(&invoice_requirements()).unwrap();
        assert_eq!(
            schema.field_names(),
            vec!["invoice_number", "amount", "po_number", "line_items"]
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let reqs = invoice_requirements();
        let first = GeneratedSchema::from_requirements(&reqs).unwrap();
        let second = GeneratedSchema::from_requirements(&reqs).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.json_schema(), second.json_schema());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let reqs = ExtractionRequirements::new(
            "Dup",
            vec![
                FieldSpec::new("name", FieldType::String, "a", true),
                FieldSpec::new("name", FieldType::Integer, "b", true),
            ],
        );
        let err = GeneratedSchema::from_requirements(&reqs).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("name".to_string()));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let reqs = ExtractionRequirements::new("Empty", vec![]);
        let err = GeneratedSchema::from_requirements(&reqs).unwrap_err();
        assert_eq!(err, SchemaError::EmptyFields);
    }

    #[test]
    fn test_invalid_field_name_rejected() {
        let reqs = ExtractionRequirements::new(
            "Bad",
            vec![FieldSpec::new("Not Snake", FieldType::String, "a", true)],
        );
        assert!(GeneratedSchema::from_requirements(&reqs).is_err());
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = GeneratedSchema::from_requirements(&invoice_requirements()).unwrap();
        let doc = schema.json_schema();

        assert_eq!(doc["type"], "object");
        assert_eq!(doc["title"], "InvoiceProcessing");
        assert_eq!(doc["additionalProperties"], Value::Bool(false));

        // All fields listed as required (strict style)
        let required: Vec<&str> = doc["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["invoice_number", "amount", "po_number", "line_items"]
        );

        // Required field has a plain type, optional field is nullable
        assert_eq!(doc["properties"]["invoice_number"]["type"], "string");
        assert_eq!(doc["properties"]["amount"]["type"], "number");
        assert_eq!(doc["properties"]["po_number"]["type"], json!(["string", "null"]));
        assert_eq!(
            doc["properties"]["line_items"]["type"],
            json!(["array", "null"])
        );
        assert_eq!(
            doc["properties"]["line_items"]["items"],
            json!({"type": "string"})
        );
        assert_eq!(doc["properties"]["amount"]["description"], "Total in USD");
    }

    #[test]
    fn test_sanitize_schema_name() {
        assert_eq!(sanitize_schema_name("invoice processing"), "InvoiceProcessing");
        assert_eq!(sanitize_schema_name("Meeting-Notes v2"), "MeetingNotesV2");
        assert_eq!(sanitize_schema_name(""), "Extraction");
        assert_eq!(sanitize_schema_name("42 things"), "Extraction42Things");
    }
}
