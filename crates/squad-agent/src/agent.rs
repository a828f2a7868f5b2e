//! Core Agent trait and the persona-driven agent implementation.
//!
//! An agent composes a layered system prompt (persona, shared documents,
//! protocol, specializations), forwards the user's message to the
//! completion service and contains any failure of that call.

use std::sync::Arc;

use async_trait::async_trait;
use squad_persistence::DocumentStore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::client::{Completion, CompletionRequest};
use crate::config::ModelConfig;
use crate::context::AgentContext;
use crate::error::{AgentError, Result};
use crate::persona::{default_soul, AgentIdentity, Persona};
use crate::prompt::{compose, PromptSection};
use crate::response::AgentReply;

/// A named reasoning unit the router can dispatch to.
///
/// Object-safe, so the router holds agents as `Arc<dyn Agent>`.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Identity of this agent.
    fn identity(&self) -> &AgentIdentity;

    /// Canonical lowercase routing name.
    fn name(&self) -> &str {
        &self.identity().name
    }

    /// Human display name.
    fn display_name(&self) -> &str {
        &self.identity().display_name
    }

    /// Build the full system prompt for the next completion call.
    async fn compose_system_prompt(&self) -> String;

    /// Answer a message. Completion failures are returned as
    /// [`AgentReply::Failed`], never as errors.
    async fn respond(&self, message: &str) -> AgentReply;

    /// Entry point used by the router.
    async fn process(&self, message: &str) -> AgentReply {
        info!(agent = %self.display_name(), "Processing message");
        self.respond(message).await
    }
}

/// Agent whose behavior is defined by its persona and prompt pipeline.
pub struct PersonaAgent {
    identity: AgentIdentity,
    context: AgentContext,
    store: DocumentStore,
    persona: Persona,
    sections: Vec<PromptSection>,
    completion: Arc<dyn Completion>,
    config: ModelConfig,
}

impl PersonaAgent {
    /// Start building an agent.
    pub fn builder(display_name: impl Into<String>, role: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(AgentIdentity::new(display_name, role))
    }

    /// Current persona text, read from the store.
    pub async fn load_persona(&self) -> String {
        self.persona.load().await
    }

    /// Context bag of this agent.
    pub fn context(&self) -> &AgentContext {
        &self.context
    }

    /// Prompt pipeline of this agent.
    pub fn sections(&self) -> &[PromptSection] {
        &self.sections
    }

    /// Model configuration used for completion calls.
    pub fn model_config(&self) -> &ModelConfig {
        &self.config
    }

    async fn complete(&self, message: &str, request: &CompletionRequest) -> Result<String> {
        match timeout(self.config.timeout(), self.completion.complete(message, request)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(self.config.timeout_secs)),
        }
    }
}

impl std::fmt::Debug for PersonaAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonaAgent")
            .field("identity", &self.identity)
            .field("sections", &self.sections.len())
            .field("context", &self.context)
            .finish()
    }
}

#[async_trait]
impl Agent for PersonaAgent {
    fn identity(&self) -> &AgentIdentity {
        &self.identity
    }

    async fn compose_system_prompt(&self) -> String {
        let persona = self.persona.load().await;
        let shared = self.store.snapshot().await;
        compose(&self.sections, &persona, &shared)
    }

    async fn respond(&self, message: &str) -> AgentReply {
        let system_context = self.compose_system_prompt().await;
        debug!(
            agent = %self.identity.display_name,
            prompt_len = system_context.len(),
            "Composed system prompt"
        );

        let request = CompletionRequest::new(self.config.provider.clone(), system_context);
        match self.complete(message, &request).await {
            Ok(text) => AgentReply::answer(text),
            Err(e) => {
                warn!(agent = %self.identity.display_name, error = %e, "Completion failed");
                AgentReply::failed(&self.identity.display_name, e.to_string())
            }
        }
    }
}

/// Builder for [`PersonaAgent`].
#[derive(Debug)]
pub struct AgentBuilder {
    identity: AgentIdentity,
    soul_template: Option<String>,
    specializations: Vec<PromptSection>,
    context: AgentContext,
}

impl AgentBuilder {
    /// Create a builder for the given identity.
    pub fn new(identity: AgentIdentity) -> Self {
        Self {
            identity,
            soul_template: None,
            specializations: Vec::new(),
            context: AgentContext::default(),
        }
    }

    /// Persona written on first construction instead of the default template.
    pub fn soul_template(mut self, template: impl Into<String>) -> Self {
        self.soul_template = Some(template.into());
        self
    }

    /// Append a specialization section after the base prompt.
    pub fn specialization(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.specializations
            .push(PromptSection::specialization(heading, body));
        self
    }

    /// Set the context bag.
    pub fn context(mut self, context: AgentContext) -> Self {
        self.context = context;
        self
    }

    /// Build the agent, creating its persona in `store` if absent.
    pub async fn build(
        self,
        store: &DocumentStore,
        completion: Arc<dyn Completion>,
        config: ModelConfig,
    ) -> Result<PersonaAgent> {
        let persona = Persona::new(store.agent_subspace(&self.identity.name)?);
        let template = self
            .soul_template
            .unwrap_or_else(|| default_soul(&self.identity));
        persona.ensure(&template).await?;

        let mut sections = PromptSection::base_pipeline();
        sections.extend(self.specializations);

        debug!(agent = %self.identity.name, sections = sections.len(), "Built agent");

        Ok(PersonaAgent {
            identity: self.identity,
            context: self.context,
            store: store.clone(),
            persona,
            sections,
            completion,
            config,
        })
    }
}
