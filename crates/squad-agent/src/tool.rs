//! External tool seam.
//!
//! Tools compute things the language model should not (sales figures,
//! sentiment scores, system diagnostics). They take a JSON parameter object
//! plus the calling agent's context and return a result object carrying a
//! `success` flag.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::AgentContext;
use crate::error::Result;

/// Raw result of a tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool considers the call successful.
    pub success: bool,

    /// Tool-specific payload.
    #[serde(default)]
    pub payload: Value,
}

impl ToolOutput {
    /// Successful result with a payload.
    pub fn success(payload: Value) -> Self {
        Self {
            success: true,
            payload,
        }
    }

    /// Failed result carrying an error message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: json!({ "error": message.into() }),
        }
    }

    /// Interpret a tool's flat result object (`{"success": bool, ...}`).
    ///
    /// The `success` field is lifted out; everything else becomes the payload.
    /// A result without a boolean `success` field counts as a failure.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let success = map.remove("success").and_then(|v| v.as_bool()).unwrap_or(false);
                Self {
                    success,
                    payload: Value::Object(map),
                }
            }
            other => Self {
                success: false,
                payload: other,
            },
        }
    }
}

/// A tool an agent may call directly.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry name of the tool.
    fn name(&self) -> &str;

    /// Execute the tool.
    async fn execute(&self, params: Value, context: &AgentContext) -> Result<ToolOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_lifts_success() {
        let output = ToolOutput::from_value(json!({"success": true, "revenue": 1200}));

        assert!(output.success);
        assert_eq!(output.payload, json!({"revenue": 1200}));
    }

    #[test]
    fn test_from_value_without_flag_is_failure() {
        assert!(!ToolOutput::from_value(json!({"revenue": 1200})).success);
        assert!(!ToolOutput::from_value(json!("plain text")).success);
    }

    #[test]
    fn test_failure_payload() {
        let output = ToolOutput::failure("no data");
        assert!(!output.success);
        assert_eq!(output.payload["error"], "no data");
    }
}
