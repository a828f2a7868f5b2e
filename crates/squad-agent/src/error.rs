//! Error types for the agent crate.

use thiserror::Error;

/// Errors that can occur in agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Tool not registered in the agent's context.
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    /// Tool execution failed.
    #[error("tool execution failed: {tool_name}: {message}")]
    ToolExecution {
        /// Name of the tool that failed.
        tool_name: String,
        /// Error message.
        message: String,
    },

    /// Model invocation failed.
    #[error("model invocation failed: {0}")]
    ModelInvocation(String),

    /// Response parsing failed.
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Completion call did not finish in time.
    #[error("completion timed out after {0}s")]
    Timeout(u64),

    /// Persona or document storage failed.
    #[error("storage error: {0}")]
    Persistence(#[from] squad_persistence::PersistenceError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::ToolExecution {
            tool_name: "sales_analytics".into(),
            message: "quota exceeded".into(),
        };
        assert_eq!(
            err.to_string(),
            "tool execution failed: sales_analytics: quota exceeded"
        );

        let err = AgentError::ToolNotFound("unknown_tool".into());
        assert_eq!(err.to_string(), "tool not found: unknown_tool");

        let err = AgentError::Timeout(30);
        assert_eq!(err.to_string(), "completion timed out after 30s");
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: AgentError = json_err.into();
        assert!(matches!(err, AgentError::Serialization(_)));
    }

    #[test]
    fn test_error_from_persistence() {
        let err: AgentError = squad_persistence::PersistenceError::InvalidKey("".into()).into();
        assert!(matches!(err, AgentError::Persistence(_)));
    }
}
