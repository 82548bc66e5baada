//! Command-line interface for bm25-retrieve
//!
//! Provides `search`, `retrieve`, `info`, `config`, and `completions` subcommands.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod info;
mod retrieve;
mod search;
mod utils;

/// Rank documents against queries with in-memory BM25
#[derive(Parser)]
#[command(name = "bm25-retrieve")]
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
    /// Rank a corpus against a single query
    Search(search::SearchArgs),

    /// Rank a corpus against every query in a file
    Retrieve(retrieve::RetrieveArgs),

    /// Display corpus statistics
    Info(info::InfoArgs),

    /// Print the effective configuration as TOML
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_name = "SHELL")]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Search(args) => search::run(args),
        Commands::Retrieve(args) => retrieve::run(args),
        Commands::Info(args) => info::run(args),
        Commands::Config(args) => config::run(args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "bm25-retrieve", &mut std::io::stdout());
            Ok(())
        }
    }
}
