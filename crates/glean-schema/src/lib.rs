//! Glean Schema Builder
//!
//! Constructs, at runtime, a typed record schema from an
//! [`ExtractionRequirements`](glean_domain::ExtractionRequirements) and
//! validates untyped JSON against it.
//!
//! # Overview
//!
//! There is no code generation and no reflection: a [`GeneratedSchema`] is a
//! mapping from field name to a closed type tag plus a required flag, with a
//! generic validating constructor that walks that mapping against parsed JSON.
//!
//! # Example
//!
//! ```
//! use glean_domain::{ExtractionRequirements, FieldSpec, FieldType};
//! use glean_schema::GeneratedSchema;
//!
//! let reqs = ExtractionRequirements::new(
//!     "Invoice",
//!     vec![
//!         FieldSpec::new("vendor", FieldType::String, "Vendor name", true),
//!         FieldSpec::new("amount", FieldType::Float, "Total in USD", true),
//!     ],
//! );
//!
//! let schema = GeneratedSchema::from_requirements(&reqs).unwrap();
//! assert_eq!(schema.field_names(), vec!["vendor", "amount"]);
//!
//! let doc = schema.json_schema();
//! assert!(doc["properties"]["vendor"].is_object());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod schema;
mod validate;

pub use error::SchemaError;
pub use schema::{sanitize_schema_name, GeneratedSchema};
