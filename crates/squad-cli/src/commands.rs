//! Command handlers for CLI subcommands.

use std::collections::BTreeMap;
use std::path::Path;

use squad_agent::Specialty;
use squad_orchestrator::Team;
use squad_persistence::DocumentStore;
use tracing::info;

use crate::cli::{Commands, DocsCommand};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command.
pub fn execute(command: Commands, state_dir: &Path, namespace: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        Commands::Agents => {
            print!("{}", format_agents());
            Ok(())
        }
        Commands::Init => runtime.block_on(cmd_init(state_dir, namespace)),
        Commands::Chat { agent, message } => {
            runtime.block_on(cmd_chat(state_dir, namespace, &agent, &message.join(" ")))
        }
        Commands::Broadcast { message } => {
            runtime.block_on(cmd_broadcast(state_dir, namespace, &message.join(" ")))
        }
        Commands::Docs { command } => {
            let store = DocumentStore::new(state_dir, namespace);
            let output = runtime.block_on(run_docs(&store, command))?;
            print!("{}", output);
            Ok(())
        }
        Commands::Repl => {
            // REPL is handled separately in main
            Ok(())
        }
    }
}

/// Assemble the team under `state_dir`, creating directories as needed.
pub async fn open_team(state_dir: &Path, namespace: &str) -> Result<Team> {
    squad_core::ensure_state_dirs(state_dir)?;
    let team = Team::with_state_dir(state_dir, namespace, Vec::new()).await?;
    Ok(team)
}

async fn cmd_init(state_dir: &Path, namespace: &str) -> Result<()> {
    let team = open_team(state_dir, namespace).await?;
    info!(root = %team.store().root().display(), "Team initialized");

    println!("Initialized team in {}", team.store().root().display());
    for key in team.store().keys()? {
        println!("  {}.md", key);
    }
    println!("  agents: {}", team.router().agent_names().join(", "));
    Ok(())
}

async fn cmd_chat(state_dir: &Path, namespace: &str, agent: &str, message: &str) -> Result<()> {
    let team = open_team(state_dir, namespace).await?;
    println!("{}", team.chat(agent, message).await);
    Ok(())
}

async fn cmd_broadcast(state_dir: &Path, namespace: &str, message: &str) -> Result<()> {
    let team = open_team(state_dir, namespace).await?;
    print!("{}", format_broadcast(&team.broadcast(message).await));
    Ok(())
}

/// Run a docs subcommand and return what should be printed.
pub async fn run_docs(store: &DocumentStore, command: DocsCommand) -> Result<String> {
    store.ensure_namespace().await?;

    match command {
        DocsCommand::Show { key: Some(key) } => {
            let text = store.try_read(&key).await?;
            Ok(match text {
                Some(text) if !text.trim().is_empty() => format!("{}\n", text.trim_end()),
                _ => format!("({} is empty)\n", key),
            })
        }
        DocsCommand::Show { key: None } => {
            let keys = store.keys()?;
            if keys.is_empty() {
                return Ok("No documents found.\n".to_string());
            }
            Ok(keys.iter().map(|key| format!("{}\n", key)).collect())
        }
        DocsCommand::Write { key, text } => {
            store.try_write(&key, &text.join(" ")).await?;
            Ok(format!("Wrote {}\n", key))
        }
        DocsCommand::Append { key, text } => {
            store.try_append(&key, &text.join(" ")).await?;
            Ok(format!("Appended to {}\n", key))
        }
    }
}

/// Team roster, one agent per line.
pub fn format_agents() -> String {
    Specialty::ALL
        .iter()
        .map(|specialty| {
            let identity = specialty.identity();
            format!(
                "{:<8} {:<8} {}\n",
                identity.name, identity.display_name, identity.role
            )
        })
        .collect()
}

/// Broadcast replies, one block per agent.
pub fn format_broadcast(replies: &BTreeMap<String, String>) -> String {
    replies
        .iter()
        .map(|(agent, reply)| format!("[{}]\n{}\n\n", agent, reply.trim_end()))
        .collect()
}
