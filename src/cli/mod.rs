//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod config;
pub mod delete;
pub mod init;
pub mod read;
pub mod search;
pub mod stats;
pub mod update;
pub mod utils;
pub mod write;

/// emem - memory log for coding agents
///
/// Appends one-line notes to day-partitioned log files and searches,
/// updates, or deletes them by id.
#[derive(Parser, Debug)]
#[command(name = "emem")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "EMEM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Memory store directory (default: nearest .easy-memory/)
    #[arg(short, long, global = true, env = "EMEM_DIR")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the memory store and write agent rules
    Init(init::InitArgs),

    /// Append an entry to today's log
    Write(write::WriteArgs),

    /// Print a day's log (default: today)
    Read(read::ReadArgs),

    /// Search entries by keyword
    Search(search::SearchArgs),

    /// Update an entry by ID
    Update(update::UpdateArgs),

    /// Delete an entry by ID
    Delete(delete::DeleteArgs),

    /// Show per-file entry counts
    Stats(stats::StatsArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}
