//! Agent identity and persona ("soul") records.

use serde::{Deserialize, Serialize};
use squad_persistence::DocumentStore;
use tracing::debug;

use crate::error::Result;

/// Key of the persona document inside an agent's subspace.
pub const SOUL_KEY: &str = "soul";

/// Immutable identity of one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Canonical lowercase name, used as the routing key.
    pub name: String,
    /// Human display name.
    pub display_name: String,
    /// Role label.
    pub role: String,
}

impl AgentIdentity {
    /// Create an identity; the routing name is the lowercased display name.
    pub fn new(display_name: impl Into<String>, role: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            name: display_name.trim().to_lowercase(),
            display_name,
            role: role.into(),
        }
    }
}

/// Default persona template for an agent without a custom one.
pub fn default_soul(identity: &AgentIdentity) -> String {
    format!(
        "# {name}\n\n\
         You are {name}, the team's {role}.\n\n\
         ## Responsibilities\n\
         - Own the work that falls under your role.\n\
         - Keep the shared goals, status and decisions in mind.\n\n\
         ## Tone\n\
         Direct, practical and brief.",
        name = identity.display_name,
        role = identity.role,
    )
}

/// Persona record stored in an agent's private subspace.
///
/// Text is never cached: every [`load`](Self::load) reads the store, so
/// edits made outside the process show up on the next prompt.
#[derive(Debug, Clone)]
pub struct Persona {
    store: DocumentStore,
}

impl Persona {
    /// Wrap an agent subspace.
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// Write `template` as the persona unless one already exists.
    ///
    /// Returns `true` if the persona was created.
    pub async fn ensure(&self, template: &str) -> Result<bool> {
        let created = self.store.try_write_if_absent(SOUL_KEY, template).await?;
        if created {
            debug!(root = %self.store.root().display(), "Created persona from template");
        }
        Ok(created)
    }

    /// Current persona text; empty if missing or unreadable.
    pub async fn load(&self) -> String {
        self.store.read(SOUL_KEY).await
    }

    /// Subspace backing this persona.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_identity_name_is_lowercase() {
        let identity = AgentIdentity::new("Milo", "Strategy Lead");
        assert_eq!(identity.name, "milo");
        assert_eq!(identity.display_name, "Milo");
    }

    #[test]
    fn test_default_soul_mentions_role() {
        let soul = default_soul(&AgentIdentity::new("Bob", "Systems Engineer"));
        assert!(soul.starts_with("# Bob"));
        assert!(soul.contains("Systems Engineer"));
    }

    #[tokio::test]
    async fn test_ensure_does_not_overwrite() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "team");
        let persona = Persona::new(store.agent_subspace("josh").unwrap());

        assert!(persona.ensure("first").await.unwrap());
        assert!(!persona.ensure("second").await.unwrap());
        assert_eq!(persona.load().await, "first");
    }

    #[tokio::test]
    async fn test_load_is_idempotent_and_sees_external_edits() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "team");
        let subspace = store.agent_subspace("angela").unwrap();
        let persona = Persona::new(subspace.clone());
        persona.ensure("Angela v1").await.unwrap();

        let first = persona.load().await;
        let second = persona.load().await;
        assert_eq!(first, second);

        std::fs::write(subspace.root().join("soul.md"), "Angela v2").unwrap();
        assert_eq!(persona.load().await, "Angela v2");
    }
}
