//! Command implementations.

mod extract;
mod schema;

pub use extract::execute_extract;
pub use schema::execute_schema;

use crate::cli::Cli;
use crate::error::Result;
use glean_domain::StructuredProvider;
use glean_llm::{ProviderConfig, ProviderRegistry};
use std::sync::Arc;

/// Collect the global provider flags into a config.
///
/// Explicit flags win; anything left unset falls back to the provider's
/// environment variables when the adapter is constructed.
pub fn provider_config(cli: &Cli) -> ProviderConfig {
    let mut config = ProviderConfig::new();
    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(deployment) = &cli.deployment {
        config = config.with_deployment(deployment);
    }
    config
}

/// Build the named provider from the default registry.
pub fn build_provider(
    name: &str,
    config: &ProviderConfig,
) -> Result<Arc<dyn StructuredProvider>> {
    let registry = ProviderRegistry::with_defaults();
    Ok(registry.create(name, config)?)
}

/// Print the registered provider names, one per line.
pub fn execute_providers() {
    let registry = ProviderRegistry::with_defaults();
    for name in registry.names() {
        println!("{}", name);
    }
}
