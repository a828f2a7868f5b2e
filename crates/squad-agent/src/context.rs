//! The opaque context bag handed to each agent.
//!
//! It carries the handles an agent is permitted to use: registered tools,
//! API settings, the shared document store ("memory") and an optional
//! license key. The core never interprets it beyond tool lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use squad_persistence::DocumentStore;
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::tool::{Tool, ToolOutput};

/// Tools, settings and store handles available to one agent.
#[derive(Clone, Default)]
pub struct AgentContext {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    settings: BTreeMap<String, String>,
    memory: Option<DocumentStore>,
    license: Option<String>,
}

impl AgentContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    /// Register several tools.
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        for tool in tools {
            self.tools.insert(tool.name().to_string(), tool);
        }
        self
    }

    /// Add an API setting.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Attach the shared document store.
    pub fn with_memory(mut self, store: DocumentStore) -> Self {
        self.memory = Some(store);
        self
    }

    /// Attach a license key.
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Look up a tool by name.
    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Names of all registered tools, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Look up an API setting.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Shared document store, if attached.
    pub fn memory(&self) -> Option<&DocumentStore> {
        self.memory.as_ref()
    }

    /// License key, if attached.
    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    /// Invoke a registered tool with this context.
    pub async fn invoke(&self, tool_name: &str, params: Value) -> Result<ToolOutput> {
        let tool = self
            .tool(tool_name)
            .ok_or_else(|| AgentError::ToolNotFound(tool_name.to_string()))?;

        debug!(tool = tool_name, "Invoking tool");
        tool.execute(params, self).await
    }
}

impl fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentContext")
            .field("tools", &self.tool_names())
            .field("settings", &self.settings.keys().collect::<Vec<_>>())
            .field("memory", &self.memory.as_ref().map(|m| m.root().to_path_buf()))
            .field("license", &self.license.is_some())
            .finish()
    }
}
