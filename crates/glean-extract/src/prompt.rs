//! Prompt assembly for requirement inference and extraction calls

use glean_domain::{FieldSpec, FieldType};

/// Build the input for the description-to-requirements call.
///
/// The provider enforces the requirements schema; the prompt only has to
/// steer naming and type selection.
pub(crate) fn requirement_prompt(description: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(REQUIREMENT_INSTRUCTIONS);
    prompt.push_str("\n\nUser description:\n---\n");
    prompt.push_str(description.trim());
    prompt.push_str("\n---\n");
    prompt
}

const REQUIREMENT_INSTRUCTIONS: &str = r#"You design data extraction schemas. From the user's description of what they want to extract, produce a schema definition.

Rules:
- field_name: snake_case, descriptive, unique (e.g. invoice_number, total_amount)
- field_type: exactly one of: string, integer, float, boolean, string_list
- description: one sentence telling an extraction model how to find and format the value
- required: true only when the description implies the value must always be present
- use_case_name: a short label for the extraction task (e.g. "Invoice Processing")
- List the fields in the order the user mentioned them."#;

/// Builds the per-document extraction input: the field briefing followed by
/// the document itself
pub(crate) struct PromptBuilder<'a> {
    fields: &'a [FieldSpec],
    document: &'a str,
}

impl<'a> PromptBuilder<'a> {
    pub(crate) fn new(fields: &'a [FieldSpec], document: &'a str) -> Self {
        Self { fields, document }
    }

    pub(crate) fn build(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("Extract the following fields from the document:\n");

        for field in self.fields {
            let requirement = if field.required {
                "required"
            } else {
                "optional, null if not found"
            };
            prompt.push_str(&format!(
                "- {} ({}, {}): {}\n",
                field.field_name,
                type_label(field.field_type),
                requirement,
                field.description
            ));
        }

        prompt.push_str("\nDocument:\n---\n");
        prompt.push_str(self.document);
        prompt.push_str("\n---\n");
        prompt
    }
}

fn type_label(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "text",
        FieldType::Integer => "whole number",
        FieldType::Float => "number",
        FieldType::Boolean => "true/false",
        FieldType::StringList => "list of text values",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_prompt_contains_description() {
        let prompt = requirement_prompt("Extract name and age");
        assert!(prompt.contains("Extract name and age"));
        assert!(prompt.contains("string_list"));
    }

    #[test]
    fn test_extraction_prompt_lists_fields_in_order() {
        let fields = vec![
            FieldSpec::new("name", FieldType::String, "Full name", true),
            FieldSpec::new("age", FieldType::Integer, "Age in years", false),
        ];
        let prompt = PromptBuilder::new(&fields, "Alice is 25.").build();

        let name_pos = prompt.find("- name").unwrap();
        let age_pos = prompt.find("- age").unwrap();
        assert!(name_pos < age_pos);
        assert!(prompt.contains("(whole number, optional, null if not found)"));
        assert!(prompt.contains("Alice is 25."));
    }
}
