//! Team router: dispatch, delegation resolution and broadcast.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use squad_agent::{find_delegation, Agent, AgentReply, DelegationRequest};

/// Maximum number of delegation hops for one top-level request.
pub const MAX_DELEGATION_DEPTH: u32 = 3;

/// Reply returned when a chain exceeds [`MAX_DELEGATION_DEPTH`].
pub const DEPTH_EXCEEDED_MESSAGE: &str =
    "Delegation chain too deep: stopped after 3 hops without reaching an answer.";

/// How one routed message ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The chain was already too deep; no agent was contacted.
    DepthExceeded {
        /// Depth at which the request arrived.
        depth: u32,
    },

    /// No agent is registered under the requested name.
    UnknownAgent {
        /// Name as requested.
        requested: String,
        /// Registered names, sorted.
        known: Vec<String>,
    },

    /// The agent answered without delegating.
    Direct {
        /// Routing name of the agent.
        agent: String,
        /// The agent's reply.
        reply: AgentReply,
    },

    /// The agent delegated once and then answered with the delegate's result.
    Delegated {
        /// Routing name of the originating agent.
        agent: String,
        /// The delegation it requested.
        delegation: DelegationRequest,
        /// Text returned for the delegated task.
        delegate_reply: String,
        /// The originating agent's final reply.
        reply: AgentReply,
    },
}

impl RouteOutcome {
    /// Final user-facing text.
    pub fn into_text(self) -> String {
        match self {
            Self::DepthExceeded { .. } => DEPTH_EXCEEDED_MESSAGE.to_string(),
            Self::UnknownAgent { requested, known } => unknown_agent_message(&requested, &known),
            Self::Direct { reply, .. } | Self::Delegated { reply, .. } => reply.into_text(),
        }
    }

    /// Whether delegation was resolved for this request.
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated { .. })
    }
}

fn unknown_agent_message(requested: &str, known: &[String]) -> String {
    format!(
        "Unknown agent '{}'. Available agents: {}",
        requested,
        known.join(", ")
    )
}

/// Message sent back to the originating agent after its delegate answered.
fn follow_up_message(delegation: &DelegationRequest, delegate_reply: &str) -> String {
    format!(
        "You delegated \"{}\" to {}. {} replied:\n\n{}\n\n\
         Using this, give your final answer to the user.",
        delegation.task, delegation.target_agent, delegation.target_agent, delegate_reply
    )
}

/// Registry of agents keyed by canonical lowercase name.
#[derive(Clone, Default)]
pub struct TeamRouter {
    agents: BTreeMap<String, Arc<dyn Agent>>,
}

impl TeamRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its routing name.
    ///
    /// Returns the agent previously registered under that name, if any.
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Option<Arc<dyn Agent>> {
        let name = agent.name().to_lowercase();
        debug!(agent = %name, "Registering agent");
        self.agents.insert(name, agent)
    }

    /// Case-insensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(&name.trim().to_lowercase()).cloned()
    }

    /// Registered routing names, sorted.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Send a top-level message to an agent.
    pub async fn chat(&self, agent_name: &str, message: &str) -> String {
        self.chat_at_depth(agent_name, message, 0).await
    }

    /// Send a message at a given delegation depth.
    pub async fn chat_at_depth(&self, agent_name: &str, message: &str, depth: u32) -> String {
        self.route_at_depth(agent_name, message, depth)
            .await
            .into_text()
    }

    /// Route a top-level message and report how it ended.
    pub async fn route(&self, agent_name: &str, message: &str) -> RouteOutcome {
        self.route_at_depth(agent_name, message, 0).await
    }

    /// Route a message at a given delegation depth.
    ///
    /// Only the first delegation tag in the agent's reply is resolved, and
    /// the originating agent's follow-up reply is returned as-is.
    pub fn route_at_depth<'a>(
        &'a self,
        agent_name: &'a str,
        message: &'a str,
        depth: u32,
    ) -> BoxFuture<'a, RouteOutcome> {
        async move {
            if depth > MAX_DELEGATION_DEPTH {
                warn!(agent = %agent_name, depth, "Delegation depth exceeded");
                return RouteOutcome::DepthExceeded { depth };
            }

            let Some(agent) = self.resolve(agent_name) else {
                warn!(agent = %agent_name, "Unknown agent");
                return RouteOutcome::UnknownAgent {
                    requested: agent_name.to_string(),
                    known: self.agent_names(),
                };
            };

            info!(agent = %agent.name(), depth, "Routing message");
            let reply = agent.process(message).await;

            let Some(delegation) = reply.answer_text().and_then(find_delegation) else {
                return RouteOutcome::Direct {
                    agent: agent.name().to_string(),
                    reply,
                };
            };

            debug!(
                from = %agent.name(),
                to = %delegation.target_agent,
                depth,
                "Delegation requested"
            );
            let target = delegation.target_key();
            let delegate_reply = self
                .route_at_depth(&target, &delegation.task, depth + 1)
                .await
                .into_text();

            let follow_up = follow_up_message(&delegation, &delegate_reply);
            let reply = agent.process(&follow_up).await;

            RouteOutcome::Delegated {
                agent: agent.name().to_string(),
                delegation,
                delegate_reply,
                reply,
            }
        }
        .boxed()
    }

    /// Send a message to every agent at once, without delegation resolution.
    pub async fn broadcast_replies(&self, message: &str) -> BTreeMap<String, AgentReply> {
        info!(agents = self.agents.len(), "Broadcasting message");
        let replies = join_all(self.agents.iter().map(|(name, agent)| async move {
            (name.clone(), agent.process(message).await)
        }))
        .await;
        replies.into_iter().collect()
    }

    /// Broadcast and render each reply as text.
    pub async fn broadcast(&self, message: &str) -> BTreeMap<String, String> {
        self.broadcast_replies(message)
            .await
            .into_iter()
            .map(|(name, reply)| (name, reply.into_text()))
            .collect()
    }
}

impl std::fmt::Debug for TeamRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeamRouter")
            .field("agents", &self.agent_names())
            .finish()
    }
}
