//! Agents for the Squad multi-agent team.
//!
//! This crate provides:
//! - The [`Agent`] trait and the persona-driven [`PersonaAgent`]
//! - Layered system prompts built from a [`PromptSection`] pipeline
//! - The delegation tag parser ([`find_delegation`])
//! - The [`Completion`] seam and its HTTP implementation ([`CompletionClient`])
//! - The [`Tool`] seam and the opaque [`AgentContext`] bag
//! - The four built-in specialists ([`specialist`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use squad_agent::{Agent, CompletionClient, ModelConfig, PersonaAgent};
//! use squad_persistence::DocumentStore;
//!
//! # async fn example() -> squad_agent::Result<()> {
//! let store = DocumentStore::new("/tmp/squad", "team");
//! store.ensure_namespace().await?;
//!
//! let config = ModelConfig::from_env();
//! let completion = Arc::new(CompletionClient::from_env(config.clone()));
//!
//! let agent = PersonaAgent::builder("Milo", "Strategy Lead")
//!     .build(&store, completion, config)
//!     .await?;
//!
//! let reply = agent.process("What should we focus on this week?").await;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod client;
pub mod config;
pub mod context;
pub mod delegation;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod response;
pub mod specialist;
pub mod tool;

pub use agent::{Agent, AgentBuilder, PersonaAgent};
pub use client::{Completion, CompletionClient, CompletionRequest};
pub use config::{ModelConfig, Provider};
pub use context::AgentContext;
pub use delegation::{find_delegation, DelegationRequest};
pub use error::{AgentError, Result};
pub use persona::{AgentIdentity, Persona, SOUL_KEY};
pub use prompt::{PromptSection, PROTOCOL_PROMPT};
pub use response::AgentReply;
pub use specialist::{
    GrowthAnalyst, MarketingLead, Specialty, StrategyLead, SystemsEngineer, SALES_ANALYTICS,
    SENTIMENT_ANALYSIS, SYSTEM_DIAGNOSTICS,
};
pub use tool::{Tool, ToolOutput};
