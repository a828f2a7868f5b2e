//! Persistence layer for Squad.
//!
//! This crate provides the namespaced shared document store every agent
//! reads its context from. Documents are plain text files written with
//! atomic file operations (write to temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use squad_persistence::{DocumentStore, GOALS};
//!
//! # async fn example() -> squad_persistence::Result<()> {
//! let store = DocumentStore::new("/home/user/.squad", "team");
//! store.ensure_namespace().await?;
//!
//! store.write(GOALS, "# Team Goals\n\n- Reach 1k paying users").await;
//! store.append("status", "Pricing page shipped").await;
//!
//! let snapshot = store.snapshot().await;
//! println!("{}", snapshot.goals);
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod defaults;
pub mod document_store;
pub mod error;

pub use defaults::{DECISIONS, GOALS, STATUS, WELL_KNOWN_DOCUMENTS};
pub use document_store::{DocumentStore, SharedSnapshot};
pub use error::{PersistenceError, Result};
