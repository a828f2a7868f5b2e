//! Error types for the orchestrator.

use thiserror::Error;

/// Orchestrator-specific errors.
///
/// Routing itself never fails; these only arise while assembling a team.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Agent error.
    #[error("Agent error: {0}")]
    Agent(#[from] squad_agent::AgentError),

    /// Document store error.
    #[error("Persistence error: {0}")]
    Persistence(#[from] squad_persistence::PersistenceError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, OrchestratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_agent_error() {
        let err: OrchestratorError = squad_agent::AgentError::ToolNotFound("x".into()).into();
        assert_eq!(err.to_string(), "Agent error: tool not found: x");
    }

    #[test]
    fn test_configuration_display() {
        let err = OrchestratorError::Configuration("state dir not writable".into());
        assert_eq!(err.to_string(), "Configuration error: state dir not writable");
    }
}
