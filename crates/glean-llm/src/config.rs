//! Provider selection and credential resolution
//!
//! Explicit constructor arguments always take precedence over environment
//! variables. Resolution happens before any network call, so a missing
//! credential surfaces as `ProviderError::Configuration` immediately.

use glean_domain::ProviderError;
use std::fmt;
use std::str::FromStr;

/// Default model when none is given for OpenAI
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Default model when none is given for Anthropic
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";

/// Default model when none is given for Google
pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-2.5-flash";

/// The built-in provider tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI chat completions
    OpenAi,
    /// Azure OpenAI deployments
    Azure,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini
    Google,
}

impl ProviderKind {
    /// The registry name for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Azure => "azure",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
        }
    }

    /// All built-in kinds
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Azure,
        ProviderKind::Anthropic,
        ProviderKind::Google,
    ];
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "azure" => Ok(ProviderKind::Azure),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "google" => Ok(ProviderKind::Google),
            other => Err(ProviderError::Configuration(format!(
                "Unknown provider '{}' (expected one of: openai, azure, anthropic, google)",
                other
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Construction options for a provider adapter.
///
/// Every field is optional; anything left `None` falls back to the provider's
/// environment variables or built-in default. Azure has no defaults for
/// endpoint and deployment, so those must resolve or construction fails.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Explicit API key (takes precedence over the environment)
    pub api_key: Option<String>,
    /// Explicit model identifier
    pub model: Option<String>,
    /// Endpoint override (base URL; required for Azure)
    pub endpoint: Option<String>,
    /// Azure deployment name
    pub deployment: Option<String>,
    /// Azure API version
    pub api_version: Option<String>,
}

impl ProviderConfig {
    /// An empty configuration: everything from the environment and defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set an explicit model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set an endpoint override
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the Azure deployment name
    pub fn with_deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    /// Set the Azure API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }
}

/// Environment lookup used during resolution; overridable in tests
pub(crate) type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Standard process-environment lookup
pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolve a value from an explicit setting or a list of environment variables
pub(crate) fn resolve(
    explicit: Option<&String>,
    env_keys: &[&str],
    env: EnvLookup<'_>,
) -> Option<String> {
    if let Some(value) = explicit {
        return Some(value.clone());
    }
    env_keys.iter().find_map(|key| env(key))
}

/// Like [`resolve`], but a missing value is a configuration error
pub(crate) fn require(
    explicit: Option<&String>,
    env_keys: &[&str],
    env: EnvLookup<'_>,
    what: &str,
) -> Result<String, ProviderError> {
    resolve(explicit, env_keys, env).ok_or_else(|| {
        ProviderError::Configuration(format!(
            "{} not found. Pass it explicitly or set one of: {}",
            what,
            env_keys.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[test]
    fn test_explicit_takes_precedence() {
        let explicit = Some("sk-explicit".to_string());
        let env = |key: &str| (key == "OPENAI_API_KEY").then(|| "sk-env".to_string());
        let resolved = resolve(explicit.as_ref(), &["OPENAI_API_KEY"], &env);
        assert_eq!(resolved.as_deref(), Some("sk-explicit"));
    }

    #[test]
    fn test_env_fallback_order() {
        let env = |key: &str| (key == "AZURE_API_KEY").then(|| "from-env".to_string());
        let resolved = resolve(None, &["AZURE_OPENAI_API_KEY", "AZURE_API_KEY"], &env);
        assert_eq!(resolved.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_require_missing_is_configuration_error() {
        let err = require(None, &["NOPE_KEY"], &no_env, "API key").unwrap_err();
        match err {
            ProviderError::Configuration(message) => assert!(message.contains("NOPE_KEY")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
