//! Error types for the extraction pipeline

use glean_domain::ProviderError;
use glean_schema::SchemaError;
use thiserror::Error;

/// Errors that can occur constructing an extractor or extracting records
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Invalid settings, or a provider credential/endpoint that could not be
    /// resolved. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The description-to-requirements step failed or returned nothing usable
    #[error("Schema inference failed: {0}")]
    SchemaInference(String),

    /// Malformed requirements or a non-conformant extracted value
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The remote structured-output call failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// The call exceeded the configured deadline
    #[error("Extraction timeout")]
    Timeout,

    /// Input document exceeds the configured maximum
    #[error("Document too long: {0} chars (max: {1})")]
    DocumentTooLong(usize, usize),

    /// Reading or writing results failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<ProviderError> for ExtractError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Configuration(message) => ExtractError::Configuration(message),
            other => ExtractError::Provider(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        ExtractError::Io(e.to_string())
    }
}
