//! Team orchestration for Squad.
//!
//! This crate provides the [`TeamRouter`], which dispatches messages to
//! named agents, resolves one delegation hop per request, bounds delegation
//! chains at [`MAX_DELEGATION_DEPTH`] and broadcasts to every agent. [`Team`]
//! assembles the built-in specialists around a shared document store.
//!
//! # Example
//!
//! ```no_run
//! use squad_orchestrator::Team;
//!
//! # async fn example() -> squad_orchestrator::Result<()> {
//! let team = Team::new(Vec::new()).await?;
//!
//! // Milo may delegate part of the question to a teammate.
//! let answer = team.chat("milo", "Are we ready to launch on Friday?").await;
//! println!("{}", answer);
//!
//! for (agent, reply) in team.broadcast("Standup: what's blocking you?").await {
//!     println!("{}: {}", agent, reply);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod router;
mod team;

pub use error::{OrchestratorError, Result};
pub use router::{RouteOutcome, TeamRouter, DEPTH_EXCEEDED_MESSAGE, MAX_DELEGATION_DEPTH};
pub use team::Team;

// Re-export commonly used types from squad-agent
pub use squad_agent::{Agent, AgentReply, DelegationRequest, Specialty, Tool, ToolOutput};
