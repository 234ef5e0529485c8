//! testimpact CLI - find the tests impacted by a commit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use testimpact_cli::commands;
use testimpact_cli::output::Format;

#[derive(Parser)]
#[command(name = "testimpact")]
#[command(about = "Find the browser-automation tests impacted by a commit", long_about = None)]
#[command(version = testimpact_core::VERSION)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Commit to analyze when no subcommand is given (default: HEAD)
    commit: Option<String>,

    /// Path to the repository (default: current directory)
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<Format>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize .testimpact.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },

    /// Analyze a commit (default command)
    Analyze {
        /// Commit to analyze (default: HEAD)
        commit: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path }) => {
            commands::init::run(path.as_deref())?;
        }
        Some(Commands::Analyze { ref commit }) => {
            commands::analyze::run(cli.repo.as_deref(), commit.as_deref(), cli.format)?;
        }
        None => {
            // Default command is analyze
            commands::analyze::run(cli.repo.as_deref(), cli.commit.as_deref(), cli.format)?;
        }
    }

    Ok(())
}
