//! git-multi-push command-line tool.
//!
//! Synchronizes the current repository with its GitHub and GitLab remotes,
//! offers to commit pending changes and merge into another branch, then
//! pushes the current branch to both hosts.

mod setup;
mod style;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use git_multi_push_core::{Config, CoreError, GitClient, Orchestrator, RunContext, RunOptions};

use crate::terminal::ConsoleTerminal;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// Push the current git repository to GitHub and GitLab in one go.
#[derive(Parser, Debug)]
#[command(name = "git-multi-push", version, about)]
struct Cli {
    /// Force push to the remotes (overwrites remote history).
    #[arg(long)]
    force: bool,

    /// Run the interactive configuration and exit.
    #[arg(long)]
    setup: bool,

    /// Path to the configuration file [default: platform config dir].
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show debug logging.
    #[arg(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", style::error(&format!("Error: {:#}", e)));
            match e.downcast_ref::<CoreError>() {
                Some(core) if core.is_environment() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let git = GitClient::system();
    git.ensure_installed().await.map_err(CoreError::from)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    if cli.setup {
        return setup::run(&config_path);
    }

    let repo_root = git.toplevel().await.map_err(CoreError::from)?;
    info!("Operating on git repository at: {}", repo_root);

    let config = Config::load(&config_path).context("failed to load configuration")?;
    debug!(path = %config_path.display(), remotes = config.remote_targets().len(), "configuration loaded");

    let ctx = RunContext {
        repo_root,
        config,
        options: RunOptions { force: cli.force },
    };

    let mut term = ConsoleTerminal::new();
    Orchestrator::new(&git, &mut term, ctx).run().await?;

    println!();
    println!("{}", style::success("Operations completed successfully"));
    Ok(())
}
