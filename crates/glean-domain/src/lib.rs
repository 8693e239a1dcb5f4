//! Glean Domain Layer
//!
//! Core domain model for the Glean structured-extraction toolkit. Defines the
//! vocabulary shared by every other layer: field specifications, extraction
//! requirements, and the trait boundary to LLM providers.
//!
//! ## Key Concepts
//!
//! - **FieldSpec**: one named, typed, described extraction target
//! - **ExtractionRequirements**: an ordered, named set of FieldSpecs
//! - **StructuredProvider**: the interface to a vendor's structured-output API
//! - **SchemaDocument**: a named JSON Schema handed to a provider
//!
//! ## Architecture
//!
//! Provider implementations live in `glean-llm`, schema construction in
//! `glean-schema`, and orchestration in `glean-extract`. This crate carries
//! only the shared types and trait definitions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod requirements;
pub mod traits;

// Re-exports for convenience
pub use error::{DomainError, ProviderError};
pub use field::{FieldSpec, FieldType};
pub use requirements::ExtractionRequirements;
pub use traits::{Record, SchemaDocument, StructuredProvider};
