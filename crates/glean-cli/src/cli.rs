//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Glean CLI - Extract structured data from text with LLM structured outputs.
#[derive(Debug, Parser)]
#[command(name = "glean")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Provider to use (openai, azure, anthropic, google)
    #[arg(short, long, global = true, default_value = "openai")]
    pub provider: String,

    /// Model identifier (provider default when omitted)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// API key (falls back to the provider's environment variable)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Endpoint override (Azure requires one)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Azure deployment name
    #[arg(long, global = true)]
    pub deployment: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Infer an extraction schema from a description and print it
    Schema(SchemaArgs),

    /// Extract structured records from documents
    Extract(ExtractArgs),

    /// List the registered provider names
    Providers,
}

/// Arguments for the schema command.
#[derive(Debug, Parser)]
pub struct SchemaArgs {
    /// Natural-language description of what to extract
    pub description: String,

    /// Write the JSON Schema to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Natural-language description of what to extract
    pub description: String,

    /// Document files to extract from (one record per file)
    pub files: Vec<String>,

    /// Read a single document from stdin instead of files
    #[arg(long)]
    pub stdin: bool,

    /// Write records to a JSON file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum document length in characters
    #[arg(long, default_value = "50000")]
    pub max_document_chars: usize,

    /// Provider request timeout in seconds
    #[arg(long, default_value = "120")]
    pub timeout_secs: u64,
}
