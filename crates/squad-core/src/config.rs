//! Shared configuration for Squad.
//!
//! Provides functions to locate Squad's state directory and common
//! configuration files across the CLI and the library crates.
//!
//! # Storage Structure
//!
//! All application data is stored under `~/.squad/`:
//!
//! ```text
//! ~/.squad/
//! ├── config/           # User configuration (.env.local)
//! ├── team/             # Shared document namespace (default name)
//! │   ├── goals.md
//! │   ├── decisions.md
//! │   ├── status.md
//! │   └── agents/
//! │       └── milo/soul.md
//! └── repl_history.txt
//! ```
//!
//! # Environment Variables
//!
//! - `SQUAD_STATE_DIR`: Override the base state directory
//! - `SQUAD_CONFIG_DIR`: Override the config directory
//! - `SQUAD_NAMESPACE`: Override the shared document namespace

use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "SQUAD_STATE_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "SQUAD_CONFIG_DIR";

/// Environment variable selecting the shared document namespace.
pub const NAMESPACE_ENV: &str = "SQUAD_NAMESPACE";

/// Namespace used when `SQUAD_NAMESPACE` is not set.
pub const DEFAULT_NAMESPACE: &str = "team";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".squad";

const CONFIG_SUBDIR: &str = "config";
const ENV_FILE: &str = ".env.local";
const HISTORY_FILE: &str = "repl_history.txt";

/// Expand a leading `~` in a user-supplied path.
pub fn resolve_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Get the Squad state directory.
///
/// The state directory is determined by:
/// 1. `SQUAD_STATE_DIR` environment variable if set
/// 2. `~/.squad` if home directory is available
/// 3. `.squad` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(|raw| resolve_dir(&raw))
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the user config directory.
///
/// Defaults to `<state_dir>/config/` or `SQUAD_CONFIG_DIR` env var.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(|raw| resolve_dir(&raw))
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the `.env.local` file path holding provider credentials.
pub fn env_file() -> PathBuf {
    config_dir().join(ENV_FILE)
}

/// Get the REPL history file under the given state directory.
pub fn history_file(state_dir: &Path) -> PathBuf {
    state_dir.join(HISTORY_FILE)
}

/// Get the shared document namespace name.
pub fn namespace() -> String {
    std::env::var(NAMESPACE_ENV)
        .ok()
        .map(|ns| ns.trim().to_string())
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
}

/// Ensure the state directory and config directory exist.
///
/// # Errors
/// Returns an error if any directory cannot be created.
pub fn ensure_state_dirs(state_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(state_dir)?;
    std::fs::create_dir_all(state_dir.join(CONFIG_SUBDIR))?;
    Ok(())
}

/// Load credentials from `.env.local`.
///
/// Checks the working directory first, then the config directory. Values
/// already present in the environment are never overridden. Returns the
/// file that was loaded, if any.
pub fn load_env() -> Option<PathBuf> {
    let candidates = [PathBuf::from(ENV_FILE), env_file()];
    for path in candidates {
        if path.is_file() && dotenvy::from_path(&path).is_ok() {
            debug!(path = %path.display(), "Loaded environment file");
            return Some(path);
        }
    }
    None
}
