//! Command-line interface for sheet-merge
//!
//! Provides `merge`, `inspect` and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod inspect;
mod merge;
mod utils;

/// Merge spreadsheet exports with floating header rows into one filtered workbook
#[derive(Parser)]
#[command(name = "sheet-merge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge spreadsheets and keep only the requested columns
    Merge(Box<merge::MergeArgs>),

    /// Show detected header rows and normalized columns without writing output
    Inspect(inspect::InspectArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG replaces the default level entirely when set.
    let filter = match std::env::var_os(EnvFilter::DEFAULT_ENV) {
        Some(_) => EnvFilter::from_default_env(),
        None if cli.verbose => EnvFilter::new("debug"),
        None => EnvFilter::new("warn"),
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Merge(args) => merge::run(*args),
        Commands::Inspect(args) => inspect::run(args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "sheet-merge", &mut std::io::stdout());
            Ok(())
        }
    }
}
