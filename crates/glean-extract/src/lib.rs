//! Glean Extract
//!
//! Turns natural-language extraction requirements into structured records.
//!
//! # Overview
//!
//! This crate is the top of the glean pipeline. Given either a plain-English
//! description of what to extract or hand-built [`ExtractionRequirements`],
//! it builds a schema once and then applies that schema to any number of
//! text documents through a structured-output LLM provider.
//!
//! # Architecture
//!
//! ```text
//! Description → Requirement Parser → Requirements → Schema → Extractor → Records
//! ```
//!
//! # Key Features
//!
//! - **Description-Driven Schemas**: One LLM call turns a description into
//!   typed field requirements
//! - **Schema Reuse**: The schema is built once per extractor, so every
//!   record in a batch shares one shape
//! - **Fault-Isolated Batches**: One bad document reports its error in place
//!   without stopping the rest
//! - **Defensive Validation**: Every provider response is re-validated
//!   against the generated schema before it becomes a record
//!
//! # Example Usage
//!
//! ```no_run
//! use glean_extract::SchemaExtractor;
//! use glean_llm::{ProviderRegistry, ProviderConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ProviderRegistry::with_defaults();
//! let provider = registry.create("openai", &ProviderConfig::default())?;
//!
//! let extractor = SchemaExtractor::from_description(
//!     "Extract the person's name and their age in years.",
//!     provider,
//! )
//! .await?;
//!
//! let results = extractor
//!     .extract(&["Alice is 25 years old.", "Bob turned 31 last week."])
//!     .await;
//!
//! for result in results {
//!     match result {
//!         Ok(record) => println!("{}", serde_json::to_string(&record)?),
//!         Err(e) => eprintln!("extraction failed: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod prompt;
mod parser;
mod extractor;
mod output;


pub use error::ExtractError;
pub use config::ExtractorConfig;
pub use extractor::{extraction_workflow, SchemaExtractor};
pub use output::save_records;
pub use parser::parse_requirements;

pub use glean_domain::ExtractionRequirements;
