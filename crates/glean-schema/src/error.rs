//! Error types for schema construction and record validation

use glean_domain::DomainError;
use thiserror::Error;

/// Errors that can occur building a schema or validating a record against it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two field specifications share a name
    #[error("Duplicate field name: '{0}'")]
    DuplicateField(String),

    /// The requirements contain no fields at all
    #[error("Requirements contain no fields")]
    EmptyFields,

    /// A field specification failed domain validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An extracted value does not conform to the schema
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        /// The offending field name
        field: String,
        /// What was wrong with the value
        reason: String,
    },
}
