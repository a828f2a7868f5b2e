//! Model configuration types for agent LLM providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AgentError;

/// Environment variable selecting the completion provider.
pub const PROVIDER_ENV: &str = "SQUAD_PROVIDER";

/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "SQUAD_MODEL";

/// Environment variable overriding the completion timeout (seconds).
pub const TIMEOUT_ENV: &str = "SQUAD_TIMEOUT_SECS";

/// LLM provider configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// OpenRouter API (supports multiple models).
    #[default]
    OpenRouter,
    /// Anthropic API (Claude models).
    Anthropic,
    /// OpenAI API (GPT models).
    OpenAI,
}

impl Provider {
    /// OpenAI-compatible chat completions endpoint for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            Self::Anthropic => "https://api.anthropic.com/v1/chat/completions",
            Self::OpenAI => "https://api.openai.com/v1/chat/completions",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Model used when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenRouter => "anthropic/claude-sonnet-4",
            Self::Anthropic => "claude-sonnet-4-0",
            Self::OpenAI => "gpt-4o",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenRouter => write!(f, "openrouter"),
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenAI => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openrouter" | "open-router" => Ok(Self::OpenRouter),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" | "open-ai" => Ok(Self::OpenAI),
            _ => Err(AgentError::Configuration(format!("unknown provider: {}", s))),
        }
    }
}

/// Model configuration for an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g., "anthropic/claude-sonnet-4", "gpt-4o").
    pub model: String,

    /// Maximum tokens to generate in responses.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for response generation (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// LLM provider to use.
    #[serde(default)]
    pub provider: Provider,

    /// Upper bound on a single completion call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::for_provider(Provider::default())
    }
}

impl ModelConfig {
    /// Create a new model configuration with the given model ID.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Create configuration using a provider's default model.
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            model: provider.default_model().to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            provider,
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Build configuration from `SQUAD_PROVIDER`, `SQUAD_MODEL` and `SQUAD_TIMEOUT_SECS`.
    ///
    /// Unparseable values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        let provider = match std::env::var(PROVIDER_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring {}", PROVIDER_ENV);
                Provider::default()
            }),
            Err(_) => Provider::default(),
        };

        let mut config = Self::for_provider(provider);
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config.model = model.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config = config.with_timeout_secs(secs),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring {}", TIMEOUT_ENV),
            }
        }
        config
    }

    /// Set the maximum tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// Set the provider.
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Set the completion timeout. Zero is raised to one second.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    /// Completion timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
