//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::error::Result;
use glean_domain::StructuredProvider;
use glean_extract::SchemaExtractor;
use std::fs;
use std::sync::Arc;

/// Execute the schema command.
///
/// Infers requirements from the description, prints the field list to
/// stderr and the JSON Schema to stdout (or the output file).
pub async fn execute_schema(
    args: SchemaArgs,
    provider: Arc<dyn StructuredProvider>,
) -> Result<()> {
    let extractor = SchemaExtractor::from_description(&args.description, provider).await?;

    eprintln!("Use case: {}", extractor.requirements().use_case_name);
    for field in extractor.fields() {
        let requirement = if field.required { "required" } else { "optional" };
        eprintln!(
            "  {} ({}, {}): {}",
            field.field_name,
            field.field_type.as_tag(),
            requirement,
            field.description
        );
    }

    let schema = serde_json::to_string_pretty(&extractor.json_schema())?;
    match args.output {
        Some(path) => {
            fs::write(&path, schema)?;
            eprintln!("Schema written to {}", path);
        }
        None => println!("{}", schema),
    }

    Ok(())
}
