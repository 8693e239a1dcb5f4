//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use glean_domain::{Record, StructuredProvider};
use glean_extract::{save_records, ExtractorConfig, SchemaExtractor};
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

/// Execute the extract command.
///
/// Failures are reported per document on stderr; the command only errors
/// outright when every document fails.
pub async fn execute_extract(
    args: ExtractArgs,
    provider: Arc<dyn StructuredProvider>,
) -> Result<()> {
    let documents = read_documents(&args)?;

    let config = ExtractorConfig {
        max_document_chars: args.max_document_chars,
        request_timeout_secs: args.timeout_secs,
    };
    let extractor =
        SchemaExtractor::from_description_with_config(&args.description, provider, config).await?;

    let results = extractor.extract(&documents).await;

    let mut records: Vec<Record> = Vec::new();
    let mut failures = 0usize;
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                failures += 1;
                eprintln!("Document {} failed: {}", index, e);
            }
        }
    }

    if records.is_empty() && failures > 0 {
        return Err(CliError::InvalidInput(format!(
            "all {} documents failed to extract",
            failures
        )));
    }

    match args.output {
        Some(path) => {
            save_records(&path, &records)?;
            eprintln!("Saved {} records to {}", records.len(), path);
        }
        None => println!("{}", serde_json::to_string_pretty(&records)?),
    }

    if failures > 0 {
        eprintln!("{} of {} documents failed", failures, documents.len());
    }

    Ok(())
}

fn read_documents(args: &ExtractArgs) -> Result<Vec<String>> {
    if args.stdin {
        if !args.files.is_empty() {
            return Err(CliError::InvalidInput(
                "cannot combine --stdin with file arguments".to_string(),
            ));
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(vec![buffer]);
    }

    if args.files.is_empty() {
        return Err(CliError::InvalidInput(
            "no documents given; pass file paths or --stdin".to_string(),
        ));
    }

    args.files
        .iter()
        .map(|path| Ok(fs::read_to_string(path)?))
        .collect()
}
