//! Parse the requirement-inference response into ExtractionRequirements

use crate::error::ExtractError;
use glean_domain::{ExtractionRequirements, FieldSpec, FieldType, SchemaDocument};
use glean_schema::SchemaError;
use serde_json::{json, Value};
use tracing::debug;

/// The fixed schema the requirement-inference call is made against.
///
/// Field type tags are constrained by an enum, so the provider enforces the
/// closed set; [`parse_requirements`] re-checks defensively anyway.
pub(crate) fn requirements_schema_document() -> SchemaDocument {
    let schema = json!({
        "type": "object",
        "title": "ExtractionRequirements",
        "properties": {
            "use_case_name": {
                "type": "string",
                "description": "Short label for the extraction task",
            },
            "fields": {
                "type": "array",
                "description": "Fields to extract, in the order the user mentioned them",
                "items": {
                    "type": "object",
                    "properties": {
                        "field_name": {
                            "type": "string",
                            "description": "snake_case identifier, unique within the list",
                        },
                        "field_type": {
                            "type": "string",
                            "enum": FieldType::ALL_TAGS,
                        },
                        "description": {
                            "type": "string",
                            "description": "How to find and format the value",
                        },
                        "required": {
                            "type": "boolean",
                        },
                    },
                    "required": ["field_name", "field_type", "description", "required"],
                    "additionalProperties": false,
                },
            },
        },
        "required": ["use_case_name", "fields"],
        "additionalProperties": false,
    });

    SchemaDocument::new("ExtractionRequirements", schema)
}

/// Turn the provider's response value into requirements.
///
/// Structural problems (missing keys, wrong shapes, zero fields) are schema
/// inference failures; a type tag outside the closed set is surfaced as the
/// schema error it would otherwise become at build time.
pub fn parse_requirements(value: &Value) -> Result<ExtractionRequirements, ExtractError> {
    let object = value
        .as_object()
        .ok_or_else(|| ExtractError::SchemaInference("response is not a JSON object".to_string()))?;

    let use_case_name = object
        .get("use_case_name")
        .and_then(Value::as_str)
        .unwrap_or("Extraction")
        .to_string();

    let field_values = object
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractError::SchemaInference("response has no 'fields' array".to_string()))?;

    if field_values.is_empty() {
        return Err(ExtractError::SchemaInference(
            "model identified zero fields to extract".to_string(),
        ));
    }

    let mut fields = Vec::with_capacity(field_values.len());
    for (idx, field_value) in field_values.iter().enumerate() {
        fields.push(parse_field(field_value, idx)?);
    }

    debug!(
        "Inferred {} fields for use case '{}'",
        fields.len(),
        use_case_name
    );

    Ok(ExtractionRequirements::new(use_case_name, fields))
}

fn parse_field(value: &Value, idx: usize) -> Result<FieldSpec, ExtractError> {
    let object = value.as_object().ok_or_else(|| {
        ExtractError::SchemaInference(format!("field {} is not a JSON object", idx))
    })?;

    let field_name = object
        .get("field_name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ExtractError::SchemaInference(format!("field {} has no 'field_name'", idx))
        })?;

    let tag = object
        .get("field_type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ExtractError::SchemaInference(format!("field '{}' has no 'field_type'", field_name))
        })?;
    let field_type = FieldType::from_tag(tag).map_err(SchemaError::from)?;

    let description = object
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let required = object
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    Ok(FieldSpec::new(field_name, field_type, description, required))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_schema_shape() {
        let doc = requirements_schema_document();
        assert_eq!(doc.name, "ExtractionRequirements");
        let tags = &doc.schema["properties"]["fields"]["items"]["properties"]["field_type"]["enum"];
        assert_eq!(tags, &json!(FieldType::ALL_TAGS));
    }

    #[test]
    fn test_parse_valid_response() {
        let response = json!({
            "use_case_name": "People",
            "fields": [
                {"field_name": "name", "field_type": "string", "description": "Full name", "required": true},
                {"field_name": "age", "field_type": "integer", "description": "Age", "required": false},
            ]
        });

        let reqs = parse_requirements(&response).unwrap();
        assert_eq!(reqs.use_case_name, "People");
        assert_eq!(reqs.field_names(), vec!["name", "age"]);
        assert_eq!(reqs.fields[0].field_type, FieldType::String);
        assert!(!reqs.fields[1].required);
    }

    #[test]
    fn test_parse_zero_fields_fails() {
        let response = json!({"use_case_name": "Empty", "fields": []});
        let err = parse_requirements(&response).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaInference(_)));
    }

    #[test]
    fn test_parse_unknown_tag_fails() {
        let response = json!({
            "use_case_name": "Bad",
            "fields": [
                {"field_name": "when", "field_type": "datetime", "description": "", "required": true},
            ]
        });
        let err = parse_requirements(&response).unwrap_err();
        assert!(matches!(err, ExtractError::Schema(_)));
    }

    #[test]
    fn test_parse_non_object_fails() {
        let err = parse_requirements(&json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaInference(_)));
    }

    #[test]
    fn test_parse_missing_fields_array_fails() {
        let err = parse_requirements(&json!({"use_case_name": "X"})).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaInference(_)));
    }
}
