//! Promptreg CLI
//!
//! Main entry point for the promptreg command-line tool.
//! Queries prompt files by header metadata and syncs prompts into workflows.

mod commands;
mod render;

use clap::{Parser, Subcommand};
use commands::{LatestCommand, SearchCommand, SyncCommand};
use promptreg_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Promptreg - search and manage prompts with metadata headers
#[derive(Parser, Debug)]
#[command(name = "promptreg")]
#[command(about = "Search and manage prompts with metadata headers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "PROMPTREG_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "PROMPTREG_CONFIG")]
    config: Option<PathBuf>,

    /// Prompts directory (default: <workspace>/prompts)
    #[arg(long, global = true)]
    prompts_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search prompts by metadata
    Search(SearchCommand),

    /// Show the latest version of a workflow's prompt
    Latest(LatestCommand),

    /// Inject a prompt into a workflow JSON file
    Sync(SyncCommand),
}

fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load(cli.workspace, cli.config)?.with_overrides(
        cli.prompts_dir,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Prompts root: {:?}", config.prompts_root());

    let command_name = match &cli.command {
        Commands::Search(_) => "search",
        Commands::Latest(_) => "latest",
        Commands::Sync(_) => "sync",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Search(cmd) => cmd.execute(&config),
        Commands::Latest(cmd) => cmd.execute(&config),
        Commands::Sync(cmd) => cmd.execute(),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
