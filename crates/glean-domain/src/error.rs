//! Error types shared across the workspace

use thiserror::Error;

/// Errors raised by domain-level validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field type tag outside the closed set
    #[error("Unsupported field type tag: '{0}'")]
    UnsupportedType(String),

    /// A field name that is not a valid snake_case identifier
    #[error("Invalid field name: '{0}'")]
    InvalidFieldName(String),
}

/// Errors raised by provider adapters
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Required credential or endpoint missing and unresolvable from the
    /// environment. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider API returned an error status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Error body or status text
        message: String,
    },

    /// The provider returned something that is not the requested structure
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The requested model is not available on this provider
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),
}
