//! AI configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the chat-completion service.
pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "glm-4-flash";

/// Default wall-clock budget for a single completion, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Token cap sent with every request.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Which LLM backend the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    #[default]
    OpenAi,
    /// Canned offline responses.
    Fake,
}

impl ProviderKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAi),
            "fake" => Some(ProviderKind::Fake),
            _ => None,
        }
    }
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer token for the service. `None` makes every AI call fail fast.
    pub api_key: Option<String>,
    /// Model name (e.g., "glm-4-flash", "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Upper bound on a single completion.
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
    pub provider: ProviderKind,
    /// Directory holding the session blobs.
    pub state_dir: PathBuf,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            provider: ProviderKind::default(),
            state_dir: Self::default_state_dir(),
        }
    }
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `ALCHEMIST_AI_API_KEY`: API key (AI features degrade to local templates without it)
    /// - `ALCHEMIST_AI_MODEL`: Model name (default: "glm-4-flash")
    /// - `ALCHEMIST_AI_BASE_URL`: API base URL (default: "https://open.bigmodel.cn/api/paas/v4")
    /// - `ALCHEMIST_AI_TIMEOUT_SECS`: Per-call timeout (default: 15)
    /// - `ALCHEMIST_AI_PROVIDER`: "openai" or "fake" (default: "openai")
    /// - `ALCHEMIST_STATE_DIR`: Session directory (default: "<data dir>/flavor-alchemist")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup("ALCHEMIST_AI_API_KEY").filter(|k| !k.trim().is_empty());

        let model = lookup("ALCHEMIST_AI_MODEL").unwrap_or(defaults.model);

        let base_url = lookup("ALCHEMIST_AI_BASE_URL").unwrap_or(defaults.base_url);

        let timeout = match lookup("ALCHEMIST_AI_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "ALCHEMIST_AI_TIMEOUT_SECS".to_string(),
                        value: v,
                    })
                }
            },
            None => defaults.timeout,
        };

        let provider = match lookup("ALCHEMIST_AI_PROVIDER") {
            Some(v) => ProviderKind::from_str(&v).ok_or(ConfigError::InvalidValue {
                name: "ALCHEMIST_AI_PROVIDER".to_string(),
                value: v,
            })?,
            None => defaults.provider,
        };

        let state_dir = lookup("ALCHEMIST_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_dir);

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            provider,
            state_dir,
        })
    }

    /// Get the default state directory: <data dir>/flavor-alchemist
    pub fn default_state_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("flavor-alchemist"))
            .unwrap_or_else(|| PathBuf::from("data/flavor-alchemist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_without_vars() {
        let config = AiConfig::from_vars(vars(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.provider, ProviderKind::OpenAi);
    }

    #[test]
    fn test_overrides() {
        let config = AiConfig::from_vars(vars(&[
            ("ALCHEMIST_AI_API_KEY", "sk-test"),
            ("ALCHEMIST_AI_MODEL", "gpt-4o-mini"),
            ("ALCHEMIST_AI_TIMEOUT_SECS", "3"),
            ("ALCHEMIST_AI_PROVIDER", "Fake"),
            ("ALCHEMIST_STATE_DIR", "/tmp/alchemist"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.provider, ProviderKind::Fake);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/alchemist"));
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = AiConfig::from_vars(vars(&[("ALCHEMIST_AI_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AiConfig::from_vars(vars(&[("ALCHEMIST_AI_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            AiConfig::from_vars(vars(&[("ALCHEMIST_AI_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            AiConfig::from_vars(vars(&[("ALCHEMIST_AI_PROVIDER", "claude")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
