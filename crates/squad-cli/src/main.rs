//! Squad CLI entry point.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use squad_cli::cli::{Cli, Commands};
use squad_cli::commands;
use squad_cli::repl::Repl;

fn main() {
    // Load .env.local before parsing so env-backed flags see it
    let env_file = squad_core::load_env();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    if let Some(path) = env_file {
        debug!(path = %path.display(), "Loaded environment file");
    }

    let state_dir = cli.state_dir();
    let namespace = cli.namespace();

    let result = match cli.command {
        Some(Commands::Repl) | None => run_repl(&state_dir, &namespace),
        Some(cmd) => commands::execute(cmd, &state_dir, &namespace),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_repl(state_dir: &std::path::Path, namespace: &str) -> commands::Result<()> {
    let mut repl = Repl::new(state_dir, namespace)?;
    repl.run()
}
