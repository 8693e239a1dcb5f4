//! Glean CLI - Extract structured data from text via LLM structured outputs.

use clap::Parser;
use glean_cli::commands;
use glean_cli::{Cli, Command};
use tracing::Level;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> glean_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let provider_config = commands::provider_config(&cli);
    let provider_name = cli.provider.clone();

    match cli.command {
        Command::Providers => {
            commands::execute_providers();
        }
        Command::Schema(args) => {
            let provider = commands::build_provider(&provider_name, &provider_config)?;
            commands::execute_schema(args, provider).await?;
        }
        Command::Extract(args) => {
            let provider = commands::build_provider(&provider_name, &provider_config)?;
            commands::execute_extract(args, provider).await?;
        }
    }

    Ok(())
}
