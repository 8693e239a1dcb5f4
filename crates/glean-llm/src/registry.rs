//! Explicit provider registry
//!
//! Maps a provider name to an adapter factory. The registry is an owned
//! value rather than process-wide state, so tests can build their own with
//! mocks and callers can add custom adapters without touching this crate.

use crate::anthropic::AnthropicProvider;
use crate::azure::AzureOpenAiProvider;
use crate::config::{ProviderConfig, ProviderKind};
use crate::google::GoogleProvider;
use crate::openai::OpenAiProvider;
use glean_domain::{ProviderError, StructuredProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Factory building an adapter from construction options
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderConfig) -> Result<Arc<dyn StructuredProvider>, ProviderError> + Send + Sync>;

/// Name-to-adapter registry.
///
/// Adding a provider requires only implementing [`StructuredProvider`] and
/// registering a factory here; no other component changes.
#[derive(Clone)]
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry with the four built-in providers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderKind::OpenAi.as_str(), |config| {
            Ok(Arc::new(OpenAiProvider::from_config(config)?))
        });
        registry.register(ProviderKind::Azure.as_str(), |config| {
            Ok(Arc::new(AzureOpenAiProvider::from_config(config)?))
        });
        registry.register(ProviderKind::Anthropic.as_str(), |config| {
            Ok(Arc::new(AnthropicProvider::from_config(config)?))
        });
        registry.register(ProviderKind::Google.as_str(), |config| {
            Ok(Arc::new(GoogleProvider::from_config(config)?))
        });
        registry
    }

    /// Register (or replace) a factory under a name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ProviderConfig) -> Result<Arc<dyn StructuredProvider>, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        self.factories
            .insert(name.into().to_ascii_lowercase(), Arc::new(factory));
    }

    /// Whether a provider name is registered
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_ascii_lowercase())
    }

    /// Registered provider names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build an adapter for the named provider.
    ///
    /// An unknown name, or a factory that cannot resolve its required
    /// settings, fails before any network call.
    pub fn create(
        &self,
        name: &str,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn StructuredProvider>, ProviderError> {
        let factory = self
            .factories
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| {
                ProviderError::Configuration(format!(
                    "Unknown provider '{}' (registered: {})",
                    name,
                    self.names().join(", ")
                ))
            })?;
        factory(config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockProvider;
    use serde_json::json;

    #[test]
    fn test_defaults_registered() {
        let registry = ProviderRegistry::with_defaults();
        for kind in ProviderKind::ALL {
            assert!(registry.is_registered(kind.as_str()));
        }
        assert_eq!(registry.names(), vec!["anthropic", "azure", "google", "openai"]);
    }

    #[test]
    fn test_unknown_name_is_configuration_error() {
        let registry = ProviderRegistry::with_defaults();
        let result = registry.create("mistral", &ProviderConfig::new());
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = ProviderRegistry::with_defaults();
        assert!(registry.is_registered("OpenAI"));
    }

    #[test]
    fn test_custom_registration() {
        let mut registry = ProviderRegistry::new();
        registry.register("mock", |_config| {
            Ok(Arc::new(MockProvider::new(json!({"ok": true}))))
        });

        let provider = registry.create("mock", &ProviderConfig::new()).unwrap();
        assert_eq!(provider.model_name(), "mock");
    }

    #[test]
    fn test_create_with_explicit_key_skips_env() {
        let registry = ProviderRegistry::with_defaults();
        let config = ProviderConfig::new().with_api_key("sk-test").with_model("gpt-4o-mini");
        let provider = registry.create("openai", &config).unwrap();
        assert_eq!(provider.model_name(), "gpt-4o-mini");
    }
}
