//! Team assembly: the document store, the four specialists and their router.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use squad_agent::{
    AgentReply, Completion, CompletionClient, GrowthAnalyst, MarketingLead, ModelConfig,
    PersonaAgent, Specialty, StrategyLead, SystemsEngineer, Tool,
};
use squad_persistence::DocumentStore;

use crate::error::{OrchestratorError, Result};
use crate::router::{RouteOutcome, TeamRouter};

/// The assembled team.
///
/// Construction ensures the namespace with its default documents and
/// creates every missing persona; nothing existing is overwritten.
#[derive(Debug, Clone)]
pub struct Team {
    router: TeamRouter,
    store: DocumentStore,
    strategy: StrategyLead,
    growth: GrowthAnalyst,
    marketing: MarketingLead,
    systems: SystemsEngineer,
}

impl Team {
    /// Assemble the team from the default state directory and namespace.
    ///
    /// The completion client reads provider and credentials from the environment.
    pub async fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self> {
        let state_dir = squad_core::state_dir();
        squad_core::ensure_state_dirs(&state_dir)
            .map_err(|e| OrchestratorError::Configuration(e.to_string()))?;

        Self::with_state_dir(&state_dir, &squad_core::namespace(), tools).await
    }

    /// Assemble the team under a custom state directory and namespace.
    pub async fn with_state_dir(
        state_dir: &Path,
        namespace: &str,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Self> {
        info!(state_dir = %state_dir.display(), namespace, "Initializing team");

        let config = ModelConfig::from_env();
        let completion = Arc::new(CompletionClient::from_env(config.clone()));
        let store = DocumentStore::new(state_dir, namespace);

        Self::assemble(store, completion, config, tools).await
    }

    /// Assemble the team from explicit collaborators.
    pub async fn assemble(
        store: DocumentStore,
        completion: Arc<dyn Completion>,
        config: ModelConfig,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Result<Self> {
        store.ensure_namespace().await?;

        let build = |specialty: Specialty| {
            let context = specialty.context(&store, &tools);
            let completion = Arc::clone(&completion);
            let config = config.clone();
            let store = store.clone();
            async move { specialty.build(&store, completion, config, context).await }
        };

        let strategy = StrategyLead::new(build(Specialty::Strategy).await?);
        let growth = GrowthAnalyst::new(build(Specialty::Growth).await?);
        let marketing = MarketingLead::new(build(Specialty::Marketing).await?);
        let systems = SystemsEngineer::new(build(Specialty::Systems).await?);

        let mut router = TeamRouter::new();
        router.register(strategy.agent());
        router.register(growth.agent());
        router.register(marketing.agent());
        router.register(systems.agent());

        info!(agents = ?router.agent_names(), "Team assembled");

        Ok(Self {
            router,
            store,
            strategy,
            growth,
            marketing,
            systems,
        })
    }

    /// Router over every team member.
    pub fn router(&self) -> &TeamRouter {
        &self.router
    }

    /// Shared document store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Milo.
    pub fn strategy(&self) -> &StrategyLead {
        &self.strategy
    }

    /// Josh.
    pub fn growth(&self) -> &GrowthAnalyst {
        &self.growth
    }

    /// Angela.
    pub fn marketing(&self) -> &MarketingLead {
        &self.marketing
    }

    /// Bob.
    pub fn systems(&self) -> &SystemsEngineer {
        &self.systems
    }

    /// Specialist agent by role.
    pub fn member(&self, specialty: Specialty) -> Arc<PersonaAgent> {
        match specialty {
            Specialty::Strategy => self.strategy.agent(),
            Specialty::Growth => self.growth.agent(),
            Specialty::Marketing => self.marketing.agent(),
            Specialty::Systems => self.systems.agent(),
        }
    }

    /// See [`TeamRouter::chat`].
    pub async fn chat(&self, agent_name: &str, message: &str) -> String {
        self.router.chat(agent_name, message).await
    }

    /// See [`TeamRouter::route`].
    pub async fn route(&self, agent_name: &str, message: &str) -> RouteOutcome {
        self.router.route(agent_name, message).await
    }

    /// See [`TeamRouter::broadcast`].
    pub async fn broadcast(&self, message: &str) -> BTreeMap<String, String> {
        self.router.broadcast(message).await
    }

    /// See [`TeamRouter::broadcast_replies`].
    pub async fn broadcast_replies(&self, message: &str) -> BTreeMap<String, AgentReply> {
        self.router.broadcast_replies(message).await
    }
}
