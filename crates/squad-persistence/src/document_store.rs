//! Namespaced shared document store.
//!
//! Documents are stored as individual text files inside a namespace
//! directory, with one private subspace per agent:
//! ```text
//! state_dir/
//! └── {namespace}/
//!     ├── goals.md
//!     ├── decisions.md
//!     ├── status.md
//!     └── agents/
//!         └── {agent}/
//!             └── soul.md
//! ```
//!
//! The infallible `read`/`write`/`append` methods log and swallow storage
//! failures: a missing or unreadable document must never block an agent.
//! The `try_*` variants expose the underlying error for callers that want it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::atomic::{atomic_write, ensure_dir, read_text_optional, write_if_absent};
use crate::defaults::{DECISIONS, GOALS, STATUS, WELL_KNOWN_DOCUMENTS};
use crate::error::{PersistenceError, Result};

/// File extension used for every document.
const DOCUMENT_EXT: &str = "md";

/// Directory holding per-agent subspaces.
const AGENTS_DIR: &str = "agents";

/// The three well-known shared documents, read together for prompt building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharedSnapshot {
    /// Contents of the goals document.
    pub goals: String,
    /// Contents of the decision log.
    pub decisions: String,
    /// Contents of the status document.
    pub status: String,
}

/// One async mutex per document path, shared by every handle of a store.
#[derive(Debug, Default)]
struct KeyLocks {
    inner: StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    fn for_path(&self, path: &Path) -> Arc<Mutex<()>> {
        let mut locks = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }
}

/// Handle to a namespace (or an agent subspace) of shared documents.
///
/// Cloning is cheap; clones share the same write serialization.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    locks: Arc<KeyLocks>,
}

impl DocumentStore {
    /// Creates a store for `namespace` under `state_dir`.
    ///
    /// Nothing is created on disk until [`ensure_namespace`](Self::ensure_namespace)
    /// or a write is performed.
    pub fn new(state_dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self::with_root(state_dir.as_ref().join(namespace))
    }

    /// Creates a store rooted directly at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Arc::new(KeyLocks::default()),
        }
    }

    /// Returns the directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the namespace directory and any missing well-known documents.
    ///
    /// Idempotent: existing documents are never overwritten.
    pub async fn ensure_namespace(&self) -> Result<()> {
        ensure_dir(&self.root)?;

        for (key, body) in WELL_KNOWN_DOCUMENTS {
            let path = self.document_path(key)?;
            let lock = self.locks.for_path(&path);
            let _guard = lock.lock().await;
            if write_if_absent(&path, body.as_bytes())? {
                debug!(key, root = %self.root.display(), "Created default document");
            }
        }

        Ok(())
    }

    /// Returns a handle scoped to one agent's private area, creating it if absent.
    pub fn agent_subspace(&self, agent_name: &str) -> Result<DocumentStore> {
        validate_key(agent_name)?;
        let root = self.root.join(AGENTS_DIR).join(agent_name.to_lowercase());
        ensure_dir(&root)?;

        Ok(Self {
            root,
            locks: Arc::clone(&self.locks),
        })
    }

    /// Reads a document, returning `None` if it does not exist.
    pub async fn try_read(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key)?;
        read_text_optional(&path)
    }

    /// Reads a document, or empty text if it is missing or unreadable.
    pub async fn read(&self, key: &str) -> String {
        match self.try_read(key).await {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                warn!(key, error = %e, "Document read failed, using empty text");
                String::new()
            }
        }
    }

    /// Replaces a document's full content.
    pub async fn try_write(&self, key: &str, text: &str) -> Result<()> {
        let path = self.document_path(key)?;
        let lock = self.locks.for_path(&path);
        let _guard = lock.lock().await;
        atomic_write(&path, text.as_bytes())
    }

    /// Replaces a document's full content, returning `false` on failure.
    pub async fn write(&self, key: &str, text: &str) -> bool {
        match self.try_write(key, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Document write failed");
                false
            }
        }
    }

    /// Writes a document only if it does not exist yet.
    ///
    /// Returns `true` if the document was created.
    pub async fn try_write_if_absent(&self, key: &str, text: &str) -> Result<bool> {
        let path = self.document_path(key)?;
        let lock = self.locks.for_path(&path);
        let _guard = lock.lock().await;
        write_if_absent(&path, text.as_bytes())
    }

    /// Appends a timestamped block (`[<timestamp>] <text>`) to a document.
    pub async fn try_append(&self, key: &str, text: &str) -> Result<()> {
        let path = self.document_path(key)?;
        let lock = self.locks.for_path(&path);
        let _guard = lock.lock().await;

        let existing = read_text_optional(&path)?.unwrap_or_default();
        let block = format!("[{}] {}", timestamp(), text.trim_end());
        let content = if existing.trim().is_empty() {
            format!("{block}\n")
        } else {
            format!("{}\n\n{block}\n", existing.trim_end())
        };

        atomic_write(&path, content.as_bytes())
    }

    /// Appends a timestamped block, returning `false` on failure.
    pub async fn append(&self, key: &str, text: &str) -> bool {
        match self.try_append(key, text).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Document append failed");
                false
            }
        }
    }

    /// Checks whether a document exists.
    pub fn exists(&self, key: &str) -> bool {
        self.document_path(key).is_ok_and(|path| path.is_file())
    }

    /// Lists the document keys in this store, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root).map_err(|source| PersistenceError::ReadError {
            path: self.root.clone(),
            source,
        })?;

        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == DOCUMENT_EXT))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        keys.sort();

        Ok(keys)
    }

    /// Reads the goals, decisions and status documents together.
    pub async fn snapshot(&self) -> SharedSnapshot {
        SharedSnapshot {
            goals: self.read(GOALS).await,
            decisions: self.read(DECISIONS).await,
            status: self.read(STATUS).await,
        }
    }

    fn document_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{DOCUMENT_EXT}")))
    }
}

/// Keys become file names, so they must stay inside the store directory.
fn validate_key(key: &str) -> Result<()> {
    let invalid = key.trim().is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.chars().any(char::is_control);

    if invalid {
        return Err(PersistenceError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{DEFAULT_DECISIONS, DEFAULT_GOALS, DEFAULT_STATUS};
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> DocumentStore {
        DocumentStore::new(dir, "team")
    }

    #[tokio::test]
    async fn test_ensure_namespace_writes_defaults() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.ensure_namespace().await.unwrap();

        assert_eq!(store.read(GOALS).await, DEFAULT_GOALS);
        assert_eq!(store.read(DECISIONS).await, DEFAULT_DECISIONS);
        assert_eq!(store.read(STATUS).await, DEFAULT_STATUS);
    }

    #[tokio::test]
    async fn test_ensure_namespace_twice_keeps_written_documents() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.ensure_namespace().await.unwrap();
        assert!(store.write(GOALS, "Reach 1k paying users").await);
        store.ensure_namespace().await.unwrap();
        store.ensure_namespace().await.unwrap();

        assert_eq!(store.read(GOALS).await, "Reach 1k paying users");
    }

    #[tokio::test]
    async fn test_ensure_namespace_keeps_documents_written_before_init() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.write(STATUS, "Operator notes").await);
        store.ensure_namespace().await.unwrap();

        assert_eq!(store.read(STATUS).await, "Operator notes");
        assert_eq!(store.read(GOALS).await, DEFAULT_GOALS);
    }

    #[tokio::test]
    async fn test_read_missing_is_empty() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert_eq!(store.read("nothing-here").await, "");
        assert!(store.try_read("nothing-here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.write("roadmap", "Q3: launch").await);
        assert!(store.write("roadmap", "Q4: expand").await);

        assert_eq!(store.read("roadmap").await, "Q4: expand");
    }

    #[tokio::test]
    async fn test_append_on_empty_key_has_timestamp_marker() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.append(STATUS, "Landing page live").await);

        let content = store.read(STATUS).await;
        assert!(content.starts_with('['));
        assert!(content.contains("Z] Landing page live"));
    }

    #[tokio::test]
    async fn test_two_appends_keep_call_order() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure_namespace().await.unwrap();

        assert!(store.append(STATUS, "first update").await);
        assert!(store.append(STATUS, "second update").await);

        let content = store.read(STATUS).await;
        assert!(content.starts_with(DEFAULT_STATUS.trim_end()));
        let first = content.find("first update").unwrap();
        let second = content.find("second update").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_all_kept() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append("log", &format!("entry-{i}")).await })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let content = store.read("log").await;
        for i in 0..16 {
            assert!(content.contains(&format!("] entry-{i}\n")), "missing entry-{i}");
        }
    }

    #[tokio::test]
    async fn test_write_if_absent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.try_write_if_absent("soul", "template").await.unwrap());
        assert!(!store.try_write_if_absent("soul", "other").await.unwrap());
        assert_eq!(store.read("soul").await, "template");
    }

    #[tokio::test]
    async fn test_invalid_keys_degrade() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert_eq!(store.read("../escape").await, "");
        assert!(!store.write("../escape", "nope").await);
        assert!(!store.append("", "nope").await);
        assert!(matches!(
            store.try_write(".hidden", "nope").await,
            Err(PersistenceError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_io_failure_degrades_to_false() {
        let dir = tempdir().unwrap();
        // A plain file where the namespace directory should be.
        let blocked = dir.path().join("team");
        fs::write(&blocked, "not a directory").unwrap();
        let store = store_in(dir.path());

        assert!(!store.write(GOALS, "text").await);
        assert!(!store.append(STATUS, "text").await);
        assert_eq!(store.read(GOALS).await, "");
        assert!(store.ensure_namespace().await.is_err());
    }

    #[tokio::test]
    async fn test_snapshot_reads_shared_documents() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        store.ensure_namespace().await.unwrap();
        store.write(DECISIONS, "Use usage-based pricing").await;

        let snapshot = store.snapshot().await;

        assert_eq!(snapshot.goals, DEFAULT_GOALS);
        assert_eq!(snapshot.decisions, "Use usage-based pricing");
        assert_eq!(snapshot.status, DEFAULT_STATUS);
    }

    #[tokio::test]
    async fn test_agent_subspace_is_isolated_and_idempotent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let milo = store.agent_subspace("Milo").unwrap();
        assert!(milo.write("soul", "Strategy lead").await);

        let again = store.agent_subspace("milo").unwrap();
        assert_eq!(again.read("soul").await, "Strategy lead");
        assert_eq!(again.root(), dir.path().join("team/agents/milo"));
        assert_eq!(store.read("soul").await, "");
    }

    #[test]
    fn test_agent_subspace_rejects_path_names() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(store.agent_subspace("../milo").is_err());
    }

    #[tokio::test]
    async fn test_keys_lists_documents() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        assert!(store.keys().unwrap().is_empty());

        store.ensure_namespace().await.unwrap();
        store.agent_subspace("josh").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["decisions", "goals", "status"]);
        assert!(store.exists(GOALS));
        assert!(!store.exists("roadmap"));
    }
}
