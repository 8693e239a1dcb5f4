//! Defensive validation of extracted values against a generated schema

use crate::error::SchemaError;
use crate::schema::GeneratedSchema;
use glean_domain::{FieldType, Record};
use serde_json::Value;

impl GeneratedSchema {
    /// Check an untyped JSON value against this schema and produce a record.
    ///
    /// Provider APIs already enforce the schema on their side; this is the
    /// defensive re-check so a malformed response can never leak through.
    /// Required fields must be present and non-null. Optional fields are
    /// normalized so the record always carries every declared key, with
    /// `null` as the explicit absent marker. Keys outside the schema are
    /// rejected.
    pub fn validate_record(&self, value: &Value) -> Result<Record, SchemaError> {
        let object = value.as_object().ok_or_else(|| SchemaError::Validation {
            field: self.name().to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(value)),
        })?;

        for key in object.keys() {
            if self.field(key).is_none() {
                return Err(SchemaError::Validation {
                    field: key.clone(),
                    reason: "field is not part of the schema".to_string(),
                });
            }
        }

        let mut record = Record::new();
        for field in self.fields() {
            let value = object.get(&field.field_name).unwrap_or(&Value::Null);

            if value.is_null() {
                if field.required {
                    return Err(SchemaError::Validation {
                        field: field.field_name.clone(),
                        reason: "required field is missing or null".to_string(),
                    });
                }
                record.insert(field.field_name.clone(), Value::Null);
                continue;
            }

            check_type(&field.field_name, field.field_type, value)?;
            record.insert(field.field_name.clone(), value.clone());
        }

        Ok(record)
    }
}

/// Check that a non-null value matches the declared type tag
fn check_type(field_name: &str, field_type: FieldType, value: &Value) -> Result<(), SchemaError> {
    let ok = match field_type {
        FieldType::String => value.is_string(),
        FieldType::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
        // Models routinely emit whole numbers for float fields
        FieldType::Float => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::StringList => value
            .as_array()
            .map(|items| items.iter().all(Value::is_string))
            .unwrap_or(false),
    };

    if ok {
        Ok(())
    } else {
        Err(SchemaError::Validation {
            field: field_name.to_string(),
            reason: format!(
                "expected {}, got {}",
                field_type.as_tag(),
                json_kind(value)
            ),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
