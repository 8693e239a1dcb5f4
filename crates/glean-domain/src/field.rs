//! Field specifications - the unit of an extraction schema

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of primitive type tags a field can carry.
///
/// The set is deliberately small: it is what every supported provider's
/// structured-output mode can enforce reliably. Anything richer (nested
/// objects, enums) is out of scope for the extraction schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// Floating point number
    Float,
    /// True/false
    Boolean,
    /// List of strings
    StringList,
}

impl FieldType {
    /// All tags in declaration order, as they appear on the wire
    pub const ALL_TAGS: [&'static str; 5] =
        ["string", "integer", "float", "boolean", "string_list"];

    /// The serialized tag for this type
    pub fn as_tag(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::StringList => "string_list",
        }
    }

    /// Parse a tag, rejecting anything outside the closed set
    ///
    /// # Examples
    ///
    /// ```
    /// use glean_domain::FieldType;
    ///
    /// assert_eq!(FieldType::from_tag("integer").unwrap(), FieldType::Integer);
    /// assert!(FieldType::from_tag("uuid").is_err());
    /// ```
    pub fn from_tag(tag: &str) -> Result<Self, DomainError> {
        match tag {
            "string" => Ok(FieldType::String),
            "integer" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "boolean" => Ok(FieldType::Boolean),
            "string_list" => Ok(FieldType::StringList),
            other => Err(DomainError::UnsupportedType(other.to_string())),
        }
    }

    /// The corresponding JSON Schema type name
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "number",
            FieldType::Boolean => "boolean",
            FieldType::StringList => "array",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// One field to extract: name, type tag, instruction text, required flag.
///
/// The `description` doubles as the only prompt mechanism: it tells the model
/// how to interpret and format the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// snake_case identifier, unique within its requirement set
    pub field_name: String,

    /// Primitive type tag from the closed set
    pub field_type: FieldType,

    /// Free text instructing the model how to fill the value
    pub description: String,

    /// If true, the provider schema makes the field mandatory; if false,
    /// the field is nullable and `null` marks an absent value
    pub required: bool,
}

impl FieldSpec {
    /// Create a new field specification
    pub fn new(
        field_name: impl Into<String>,
        field_type: FieldType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_type,
            description: description.into(),
            required,
        }
    }

    /// Check that the field name is a usable snake_case identifier
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = &self.field_name;
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if name.is_empty() || !valid_start || !valid_rest {
            return Err(DomainError::InvalidFieldName(name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in FieldType::ALL_TAGS {
            let ty = FieldType::from_tag(tag).unwrap();
            assert_eq!(ty.as_tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let err = FieldType::from_tag("uuid").unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedType(t) if t == "uuid"));
    }

    #[test]
    fn test_serde_tag_matches_from_tag() {
        let json = serde_json::to_string(&FieldType::StringList).unwrap();
        assert_eq!(json, "\"string_list\"");

        let parsed: FieldType = serde_json::from_str("\"float\"").unwrap();
        assert_eq!(parsed, FieldType::Float);
    }

    #[test]
    fn test_serde_unknown_tag_fails() {
        let result: Result<FieldType, _> = serde_json::from_str("\"datetime\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_field_names() {
        for name in ["name", "invoice_number", "_private", "field2"] {
            let spec = FieldSpec::new(name, FieldType::String, "desc", true);
            assert!(spec.validate().is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_field_names() {
        for name in ["", "InvoiceNumber", "2field", "has space", "dash-ed"] {
            let spec = FieldSpec::new(name, FieldType::String, "desc", true);
            assert!(spec.validate().is_err(), "{} should be invalid", name);
        }
    }
}
