//! Extraction requirements - a named, ordered set of field specifications

use crate::field::FieldSpec;
use serde::{Deserialize, Serialize};

/// A named, ordered collection of [`FieldSpec`]s describing one extraction
/// task.
///
/// Field order defines schema field order. Names must be unique; the schema
/// builder rejects duplicates. Created once per distinct task, either by the
/// requirement parser or by hand for reuse and determinism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequirements {
    /// Human label for the task; also seeds the generated schema's name
    pub use_case_name: String,

    /// Ordered field specifications
    pub fields: Vec<FieldSpec>,
}

impl ExtractionRequirements {
    /// Create requirements from a label and a field list
    pub fn new(use_case_name: impl Into<String>, fields: Vec<FieldSpec>) -> Self {
        Self {
            use_case_name: use_case_name.into(),
            fields,
        }
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field_name.as_str()).collect()
    }

    /// The first field name that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.fields
            .iter()
            .find(|f| !seen.insert(f.field_name.as_str()))
            .map(|f| f.field_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn spec(name: &str) -> FieldSpec {
        FieldSpec::new(name, FieldType::String, "desc", true)
    }

    #[test]
    fn test_field_names_preserve_order() {
        let reqs = ExtractionRequirements::new(
            "Invoice",
            vec![spec("vendor"), spec("amount"), spec("due_date")],
        );
        assert_eq!(reqs.field_names(), vec!["vendor", "amount", "due_date"]);
    }

    #[test]
    fn test_first_duplicate() {
        let reqs = ExtractionRequirements::new(
            "Invoice",
            vec![spec("vendor"), spec("amount"), spec("vendor")],
        );
        assert_eq!(reqs.first_duplicate(), Some("vendor"));

        let clean = ExtractionRequirements::new("Invoice", vec![spec("vendor"), spec("amount")]);
        assert_eq!(clean.first_duplicate(), None);
    }
}
