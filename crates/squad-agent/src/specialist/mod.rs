//! The built-in specialist agents.
//!
//! Each specialist is a [`PersonaAgent`] with its own persona template and
//! specialization sections, plus direct tool pass-throughs. Pass-throughs
//! call the registered tool with the agent's context and return its raw
//! output; they never go through the language model or the router.
//!
//! | Name     | Role              | Tools                |
//! |----------|-------------------|----------------------|
//! | `milo`   | Strategy Lead     | none                 |
//! | `josh`   | Growth Analyst    | `sales_analytics`    |
//! | `angela` | Marketing Lead    | `sentiment_analysis` |
//! | `bob`    | Systems Engineer  | `system_diagnostics` |

mod prompts;

use std::sync::Arc;

use serde_json::{json, Value};
use squad_persistence::DocumentStore;

use crate::agent::{AgentBuilder, PersonaAgent};
use crate::client::Completion;
use crate::config::ModelConfig;
use crate::context::AgentContext;
use crate::error::Result;
use crate::persona::AgentIdentity;
use crate::tool::{Tool, ToolOutput};

use prompts::*;

/// Tool computing sales and pricing figures.
pub const SALES_ANALYTICS: &str = "sales_analytics";

/// Tool scoring customer sentiment.
pub const SENTIMENT_ANALYSIS: &str = "sentiment_analysis";

/// Tool reporting system health.
pub const SYSTEM_DIAGNOSTICS: &str = "system_diagnostics";

/// The four built-in roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Specialty {
    /// Milo.
    Strategy,
    /// Josh.
    Growth,
    /// Angela.
    Marketing,
    /// Bob.
    Systems,
}

impl Specialty {
    /// Every specialty, in team order.
    pub const ALL: [Specialty; 4] = [
        Specialty::Strategy,
        Specialty::Growth,
        Specialty::Marketing,
        Specialty::Systems,
    ];

    /// Identity of the agent filling this role.
    pub fn identity(&self) -> AgentIdentity {
        match self {
            Self::Strategy => AgentIdentity::new("Milo", "Strategy Lead"),
            Self::Growth => AgentIdentity::new("Josh", "Growth Analyst"),
            Self::Marketing => AgentIdentity::new("Angela", "Marketing Lead"),
            Self::Systems => AgentIdentity::new("Bob", "Systems Engineer"),
        }
    }

    /// Persona written on first start.
    pub fn soul_template(&self) -> &'static str {
        match self {
            Self::Strategy => MILO_SOUL,
            Self::Growth => JOSH_SOUL,
            Self::Marketing => ANGELA_SOUL,
            Self::Systems => BOB_SOUL,
        }
    }

    /// Sections appended after the base prompt, as `(heading, body)`.
    pub fn specialization(&self) -> [(&'static str, &'static str); 2] {
        let (capabilities, routine) = match self {
            Self::Strategy => (MILO_CAPABILITIES, MILO_ROUTINE),
            Self::Growth => (JOSH_CAPABILITIES, JOSH_ROUTINE),
            Self::Marketing => (ANGELA_CAPABILITIES, ANGELA_ROUTINE),
            Self::Systems => (BOB_CAPABILITIES, BOB_ROUTINE),
        };
        [("Capabilities", capabilities), ("Daily Routine", routine)]
    }

    /// Tools this role may call directly.
    pub fn tools(&self) -> &'static [&'static str] {
        match self {
            Self::Strategy => &[],
            Self::Growth => &[SALES_ANALYTICS],
            Self::Marketing => &[SENTIMENT_ANALYSIS],
            Self::Systems => &[SYSTEM_DIAGNOSTICS],
        }
    }

    /// Context bag holding the store and the subset of `tools` this role uses.
    pub fn context(&self, store: &DocumentStore, tools: &[Arc<dyn Tool>]) -> AgentContext {
        let allowed = self.tools();
        AgentContext::new().with_memory(store.clone()).with_tools(
            tools
                .iter()
                .filter(|tool| allowed.iter().any(|name| *name == tool.name()))
                .cloned(),
        )
    }

    /// Build the agent for this role, creating its persona if absent.
    pub async fn build(
        &self,
        store: &DocumentStore,
        completion: Arc<dyn Completion>,
        config: ModelConfig,
        context: AgentContext,
    ) -> Result<PersonaAgent> {
        let mut builder = AgentBuilder::new(self.identity())
            .soul_template(self.soul_template())
            .context(context);
        for (heading, body) in self.specialization() {
            builder = builder.specialization(heading, body);
        }
        builder.build(store, completion, config).await
    }
}

/// Fold the pass-through action name into a tool parameter object.
fn with_action(params: Value, action: &str) -> Value {
    match params {
        Value::Object(mut map) => {
            map.entry("action").or_insert_with(|| json!(action));
            Value::Object(map)
        }
        Value::Null => json!({ "action": action }),
        other => json!({ "action": action, "input": other }),
    }
}

/// Milo, the Strategy Lead.
#[derive(Debug, Clone)]
pub struct StrategyLead {
    agent: Arc<PersonaAgent>,
}

impl StrategyLead {
    /// Wrap a built agent.
    pub fn new(agent: PersonaAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// The underlying agent, for registration with a router.
    pub fn agent(&self) -> Arc<PersonaAgent> {
        Arc::clone(&self.agent)
    }
}

/// Josh, the Growth Analyst.
#[derive(Debug, Clone)]
pub struct GrowthAnalyst {
    agent: Arc<PersonaAgent>,
}

impl GrowthAnalyst {
    /// Wrap a built agent.
    pub fn new(agent: PersonaAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// The underlying agent, for registration with a router.
    pub fn agent(&self) -> Arc<PersonaAgent> {
        Arc::clone(&self.agent)
    }

    /// Sales report from the sales analytics tool.
    pub async fn sales_report(&self, params: Value) -> Result<ToolOutput> {
        self.agent
            .context()
            .invoke(SALES_ANALYTICS, with_action(params, "sales_report"))
            .await
    }

    /// Pricing analysis from the sales analytics tool.
    pub async fn pricing_analysis(&self, params: Value) -> Result<ToolOutput> {
        self.agent
            .context()
            .invoke(SALES_ANALYTICS, with_action(params, "pricing_analysis"))
            .await
    }
}

/// Angela, the Marketing Lead.
#[derive(Debug, Clone)]
pub struct MarketingLead {
    agent: Arc<PersonaAgent>,
}

impl MarketingLead {
    /// Wrap a built agent.
    pub fn new(agent: PersonaAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// The underlying agent, for registration with a router.
    pub fn agent(&self) -> Arc<PersonaAgent> {
        Arc::clone(&self.agent)
    }

    /// Sentiment scan from the sentiment analysis tool.
    pub async fn sentiment_scan(&self, params: Value) -> Result<ToolOutput> {
        self.agent
            .context()
            .invoke(SENTIMENT_ANALYSIS, with_action(params, "sentiment_scan"))
            .await
    }
}

/// Bob, the Systems Engineer.
#[derive(Debug, Clone)]
pub struct SystemsEngineer {
    agent: Arc<PersonaAgent>,
}

impl SystemsEngineer {
    /// Wrap a built agent.
    pub fn new(agent: PersonaAgent) -> Self {
        Self {
            agent: Arc::new(agent),
        }
    }

    /// The underlying agent, for registration with a router.
    pub fn agent(&self) -> Arc<PersonaAgent> {
        Arc::clone(&self.agent)
    }

    /// Health check from the system diagnostics tool.
    pub async fn system_check(&self, params: Value) -> Result<ToolOutput> {
        self.agent
            .context()
            .invoke(SYSTEM_DIAGNOSTICS, with_action(params, "system_check"))
            .await
    }
}
