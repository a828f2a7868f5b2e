//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version string with git hash and build date, e.g. "0.1.0 (abc1234, 2026-10-18)".
fn version_string() -> &'static str {
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        format!(
            "{} ({}, {})",
            env!("CARGO_PKG_VERSION"),
            env!("SQUAD_GIT_HASH"),
            env!("SQUAD_BUILD_DATE")
        )
    })
}

/// Squad - a small team of AI specialists sharing one set of documents
#[derive(Parser, Debug)]
#[command(name = "squad")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "SQUAD_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Document namespace shared by the team
    #[arg(short, long, env = "SQUAD_NAMESPACE")]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the team's agents
    Agents,

    /// Send a message to one agent (delegation is resolved)
    Chat {
        /// Agent name (milo, josh, angela, bob)
        #[arg(required = true)]
        agent: String,

        /// Message to send
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Send a message to every agent at once
    Broadcast {
        /// Message to send
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Read or update shared documents
    Docs {
        #[command(subcommand)]
        command: DocsCommand,
    },

    /// Create the namespace, default documents and agent personas
    Init,

    /// Start interactive REPL mode
    Repl,
}

/// Shared document subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum DocsCommand {
    /// Print a document, or list all documents
    Show {
        /// Document key (goals, decisions, status, ...)
        key: Option<String>,
    },

    /// Replace a document's content
    Write {
        /// Document key
        key: String,

        /// New content
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Append a timestamped entry to a document
    Append {
        /// Document key
        key: String,

        /// Entry text
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .as_ref()
            .map(|dir| squad_core::resolve_dir(&dir.to_string_lossy()))
            .unwrap_or_else(squad_core::state_dir)
    }

    /// Returns the namespace, using default if not specified.
    pub fn namespace(&self) -> String {
        self.namespace
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty())
            .map(String::from)
            .unwrap_or_else(squad_core::namespace)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        // No args enters REPL mode
        let cli = Cli::parse_from(["squad"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_chat_joins_words() {
        let cli = Cli::parse_from(["squad", "chat", "milo", "Should", "we", "launch?"]);
        match cli.command {
            Some(Commands::Chat { agent, message }) => {
                assert_eq!(agent, "milo");
                assert_eq!(message.join(" "), "Should we launch?");
            }
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_cli_parse_chat_requires_message() {
        assert!(Cli::try_parse_from(["squad", "chat", "milo"]).is_err());
    }

    #[test]
    fn test_cli_parse_broadcast() {
        let cli = Cli::parse_from(["squad", "broadcast", "standup"]);
        assert!(matches!(cli.command, Some(Commands::Broadcast { message }) if message == ["standup"]));
    }

    #[test]
    fn test_cli_parse_docs() {
        let cli = Cli::parse_from(["squad", "docs", "show"]);
        match cli.command {
            Some(Commands::Docs { command }) => {
                assert_eq!(command, DocsCommand::Show { key: None })
            }
            _ => panic!("Expected Docs command"),
        }

        let cli = Cli::parse_from(["squad", "docs", "append", "status", "Beta", "shipped"]);
        match cli.command {
            Some(Commands::Docs { command }) => assert_eq!(
                command,
                DocsCommand::Append {
                    key: "status".into(),
                    text: vec!["Beta".into(), "shipped".into()],
                }
            ),
            _ => panic!("Expected Docs command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "squad",
            "--state-dir",
            "/tmp/squad-state",
            "--namespace",
            " launch ",
            "agents",
        ]);
        assert_eq!(cli.state_dir(), PathBuf::from("/tmp/squad-state"));
        assert_eq!(cli.namespace(), "launch");
        assert!(matches!(cli.command, Some(Commands::Agents)));
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["squad", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
