//! Agent reply type.

use serde::Serialize;

/// Outcome of one agent turn.
///
/// Completion failures never escape an agent as errors; they become
/// [`AgentReply::Failed`], which still renders as user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AgentReply {
    /// The model answered.
    Answer {
        /// Reply text.
        text: String,
    },

    /// The completion call failed or timed out.
    Failed {
        /// Display name of the agent that failed.
        agent: String,
        /// Error description.
        error: String,
    },
}

impl AgentReply {
    /// Create a successful reply.
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer { text: text.into() }
    }

    /// Create a failed reply.
    pub fn failed(agent: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed {
            agent: agent.into(),
            error: error.into(),
        }
    }

    /// Check whether this reply is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Answer text, if the model answered.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Self::Answer { text } => Some(text),
            Self::Failed { .. } => None,
        }
    }

    /// User-facing text.
    pub fn text(&self) -> String {
        match self {
            Self::Answer { text } => text.clone(),
            Self::Failed { agent, error } => {
                format!("Sorry, {} ran into an error while responding: {}", agent, error)
            }
        }
    }

    /// Consume the reply into user-facing text.
    pub fn into_text(self) -> String {
        match self {
            Self::Answer { text } => text,
            failed => failed.text(),
        }
    }
}

impl std::fmt::Display for AgentReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer() {
        let reply = AgentReply::answer("Ship Friday.");
        assert!(!reply.is_failure());
        assert_eq!(reply.answer_text(), Some("Ship Friday."));
        assert_eq!(reply.into_text(), "Ship Friday.");
    }

    #[test]
    fn test_failed_text_mentions_error() {
        let reply = AgentReply::failed("Josh", "model invocation failed: 503");

        assert!(reply.is_failure());
        assert!(reply.answer_text().is_none());
        assert_eq!(
            reply.to_string(),
            "Sorry, Josh ran into an error while responding: model invocation failed: 503"
        );
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_value(AgentReply::failed("Bob", "timeout")).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["agent"], "Bob");
    }
}
