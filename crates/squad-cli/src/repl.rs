//! Interactive REPL (Read-Eval-Print Loop) for Squad.

use std::path::{Path, PathBuf};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use squad_orchestrator::Team;
use squad_persistence::WELL_KNOWN_DOCUMENTS;
use tracing::debug;

use crate::cli::DocsCommand;
use crate::commands::{format_broadcast, open_team, run_docs, Result};

/// Agent addressed by plain text before any `@agent` message.
const DEFAULT_AGENT: &str = "milo";

const HELP: &str = "\
Commands:
  @<agent> <message>   Send a message to one agent (e.g. @josh how are sales?)
  <message>            Send to the agent you last addressed
  /all <message>       Send a message to every agent
  /agents              List agents
  /docs [key]          Show the shared documents, or one document
  /help                Show this help
  /quit                Exit";

/// Tab completion for slash commands and `@agent` mentions.
struct CommandCompleter {
    agents: Vec<String>,
}

impl CommandCompleter {
    const COMMANDS: &'static [&'static str] = &["/agents", "/all", "/docs", "/help", "/quit"];

    fn new(agents: Vec<String>) -> Self {
        Self { agents }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];

        let candidates: Vec<String> = if prefix.starts_with('/') {
            Self::COMMANDS.iter().map(|cmd| cmd.to_string()).collect()
        } else if prefix.starts_with('@') && !prefix.contains(' ') {
            self.agents.iter().map(|name| format!("@{}", name)).collect()
        } else {
            return Ok((0, vec![]));
        };

        let matches = candidates
            .into_iter()
            .filter(|candidate| candidate.starts_with(prefix))
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Commands available in the REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Message for one agent
    Chat {
        /// Agent name as typed
        agent: String,
        /// Message text
        message: String,
    },
    /// Message for every agent
    Broadcast(String),
    /// List agents
    Agents,
    /// Show documents (optionally one)
    Docs(Option<String>),
    /// Show help
    Help,
    /// Quit the REPL
    Quit,
    /// Unknown or malformed command
    Unknown(String),
    /// Plain text (not a command)
    Text(String),
}

impl ReplCommand {
    /// Parses input into a REPL command.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Some(stripped) = input.strip_prefix('/') {
            let (cmd, arg) = split_first_word(stripped);
            let cmd = cmd.to_lowercase();

            match cmd.as_str() {
                "all" | "broadcast" => match arg {
                    Some(message) => ReplCommand::Broadcast(message),
                    None => ReplCommand::Unknown("usage: /all <message>".to_string()),
                },
                "agents" | "a" => ReplCommand::Agents,
                "docs" | "d" => ReplCommand::Docs(arg),
                "help" | "h" | "?" => ReplCommand::Help,
                "quit" | "q" | "exit" => ReplCommand::Quit,
                _ => ReplCommand::Unknown(cmd),
            }
        } else if let Some(stripped) = input.strip_prefix('@') {
            match split_first_word(stripped) {
                (agent, Some(message)) if !agent.is_empty() => ReplCommand::Chat {
                    agent: agent.to_lowercase(),
                    message,
                },
                _ => ReplCommand::Unknown("usage: @<agent> <message>".to_string()),
            }
        } else {
            ReplCommand::Text(input.to_string())
        }
    }
}

/// Split off the first whitespace-delimited word; the rest is trimmed and `None` if empty.
fn split_first_word(input: &str) -> (&str, Option<String>) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => {
            let rest = rest.trim();
            (word, (!rest.is_empty()).then(|| rest.to_string()))
        }
        None => (input, None),
    }
}

/// REPL state
pub struct Repl {
    editor: Editor<CommandCompleter, DefaultHistory>,
    team: Team,
    runtime: tokio::runtime::Runtime,
    current_agent: String,
    history_path: PathBuf,
}

impl Repl {
    /// Creates a new REPL instance, assembling the team under `state_dir`.
    pub fn new(state_dir: &Path, namespace: &str) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let team = runtime.block_on(open_team(state_dir, namespace))?;

        let config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandCompleter::new(team.router().agent_names())));

        let history_path = squad_core::history_file(state_dir);
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
        }

        Ok(Self {
            editor,
            team,
            runtime,
            current_agent: DEFAULT_AGENT.to_string(),
            history_path,
        })
    }

    /// Runs the REPL loop.
    pub fn run(&mut self) -> Result<()> {
        println!("Squad REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Team: {}", self.team.router().agent_names().join(", "));
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            let prompt = format!("squad [{}]> ", self.current_agent);

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    self.editor.add_history_entry(&line)?;

                    let cmd = ReplCommand::parse(&line);
                    debug!(?cmd, "Parsed command");

                    match self.handle_command(cmd) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        let _ = self.editor.save_history(&self.history_path);

        println!("Goodbye!");
        Ok(())
    }

    /// Handles a REPL command. Returns Ok(true) if should quit.
    fn handle_command(&mut self, cmd: ReplCommand) -> Result<bool> {
        match cmd {
            ReplCommand::Chat { agent, message } => {
                if self.team.router().resolve(&agent).is_some() {
                    self.current_agent = agent.clone();
                }
                self.chat(&agent, &message);
            }
            ReplCommand::Text(message) => {
                let agent = self.current_agent.clone();
                self.chat(&agent, &message);
            }
            ReplCommand::Broadcast(message) => {
                println!("Broadcasting to {} agents...", self.team.router().len());
                let replies = self.runtime.block_on(self.team.broadcast(&message));
                print!("{}", format_broadcast(&replies));
            }
            ReplCommand::Agents => {
                print!("{}", crate::commands::format_agents());
            }
            ReplCommand::Docs(key) => self.show_docs(key)?,
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => return Ok(true),
            ReplCommand::Unknown(what) => {
                println!("Unknown command: {} (type /help)", what);
            }
        }
        Ok(false)
    }

    fn chat(&self, agent: &str, message: &str) {
        let reply = self.runtime.block_on(self.team.chat(agent, message));
        println!("{}", reply);
        println!();
    }

    fn show_docs(&self, key: Option<String>) -> Result<()> {
        let store = self.team.store();
        match key {
            Some(key) => {
                let output = self
                    .runtime
                    .block_on(run_docs(store, DocsCommand::Show { key: Some(key) }))?;
                print!("{}", output);
            }
            None => {
                for (key, _) in WELL_KNOWN_DOCUMENTS {
                    let text = self.runtime.block_on(store.read(key));
                    println!("== {} ==\n{}\n", key, text.trim_end());
                }
            }
        }
        Ok(())
    }
}
