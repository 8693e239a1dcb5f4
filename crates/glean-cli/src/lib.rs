//! Glean CLI library.
//!
//! Command parsing and execution for the `glean` binary: schema inference,
//! document extraction, and provider listing.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
