//! Completion service seam and its OpenAI-compatible HTTP client.
//!
//! Agents only see the [`Completion`] trait: one message plus a system
//! context in, reply text out. [`CompletionClient`] implements it against
//! OpenRouter, Anthropic or OpenAI chat completion endpoints.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{ModelConfig, Provider};
use crate::error::{AgentError, Result};

/// Options passed with every completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Provider the call should be routed to.
    pub provider: Provider,
    /// Fully composed system prompt.
    pub system_context: String,
}

impl CompletionRequest {
    /// Create a request for the given provider and system prompt.
    pub fn new(provider: Provider, system_context: impl Into<String>) -> Self {
        Self {
            provider,
            system_context: system_context.into(),
        }
    }
}

/// External chat-completion service.
///
/// Implementations may fail; agents contain those failures.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Complete `message` under the request's system context.
    async fn complete(&self, message: &str, request: &CompletionRequest) -> Result<String>;
}

/// HTTP client for OpenAI-compatible chat completion endpoints.
#[derive(Clone)]
pub struct CompletionClient {
    client: reqwest::Client,
    config: ModelConfig,
    api_keys: HashMap<Provider, String>,
}

impl CompletionClient {
    /// Create a client with an explicit API key for the configured provider.
    pub fn new(config: ModelConfig, api_key: impl Into<String>) -> Self {
        let mut api_keys = HashMap::new();
        api_keys.insert(config.provider.clone(), api_key.into());
        Self {
            client: reqwest::Client::new(),
            config,
            api_keys,
        }
    }

    /// Create a client reading every provider's API key from the environment.
    ///
    /// Missing keys are not an error here; calls to a provider without a key
    /// fail with [`AgentError::Configuration`].
    pub fn from_env(config: ModelConfig) -> Self {
        let api_keys = [Provider::OpenRouter, Provider::Anthropic, Provider::OpenAI]
            .into_iter()
            .filter_map(|provider| {
                std::env::var(provider.api_key_env())
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .map(|key| (provider, key))
            })
            .collect();

        Self {
            client: reqwest::Client::new(),
            config,
            api_keys,
        }
    }

    /// Whether an API key is available for the configured provider.
    pub fn is_available(&self) -> bool {
        self.api_keys.contains_key(&self.config.provider)
    }

    /// Model configuration used for requests.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn build_request(&self, message: &str, request: &CompletionRequest) -> ChatRequest {
        // The configured model only applies to its own provider.
        let model = if request.provider == self.config.provider {
            self.config.model.clone()
        } else {
            request.provider.default_model().to_string()
        };

        ChatRequest {
            model,
            messages: vec![
                ChatMessage::system(&request.system_context),
                ChatMessage::user(message),
            ],
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        }
    }
}

#[async_trait]
impl Completion for CompletionClient {
    async fn complete(&self, message: &str, request: &CompletionRequest) -> Result<String> {
        let provider = &request.provider;
        let api_key = self.api_keys.get(provider).ok_or_else(|| {
            AgentError::Configuration(format!(
                "Missing {} environment variable",
                provider.api_key_env()
            ))
        })?;

        let body = self.build_request(message, request);
        trace!("Sending chat request: {:?}", body);

        let response = self
            .client
            .post(provider.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "Squad")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ModelInvocation(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::ModelInvocation(format!(
                "{} API error {}: {}",
                provider, status, text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParse(format!("Failed to parse response: {}", e)))?;

        debug!(
            provider = %provider,
            "Chat response received: {} tokens used",
            response.usage.as_ref().map_or(0, |u| u.total_tokens)
        );

        response.into_text()
    }
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// Conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message in the chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: String,

    /// Text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    #[serde(default)]
    pub id: Option<String>,

    /// Completion choices.
    pub choices: Vec<ChatChoice>,

    /// Token usage information.
    pub usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Text of the first choice; an empty or missing reply is an error.
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AgentError::ResponseParse("completion contained no text".into()))
    }
}

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The message for this choice.
    pub message: ResponseMessage,

    /// Finish reason (stop, length, etc.).
    pub finish_reason: Option<String>,
}

/// Message in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Text content of the response.
    pub content: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,

    /// Tokens in the completion.
    pub completion_tokens: u32,

    /// Total tokens used.
    pub total_tokens: u32,
}
