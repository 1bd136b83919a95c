//! `emem init` command
//!
//! Creates the store directory, writes the agent rules block into the
//! project's instructions file, and drops the initialization marker.
//!
//! # Usage
//! ```bash
//! emem init                   # ./.easy-memory + ./AGENTS.md
//! emem init --dir mem/        # mem/ + ./AGENTS.md
//! emem init --force           # rewrite rules block and marker
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::Workspace;
use super::GlobalArgs;
use crate::core::store::{InitOptions, InitOutcome};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Re-run even if the store is already initialized
    #[arg(short, long)]
    pub force: bool,

    /// Do not touch the agent-instructions file
    #[arg(long)]
    pub no_rules: bool,
}

pub fn run(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(None);

    let rules_file = (!args.no_rules).then(|| ws.config.rules_path(&ws.store_dir));
    let opts = InitOptions {
        rules_file: rules_file.clone(),
        force: args.force,
    };

    match log.initialize(&opts)? {
        InitOutcome::AlreadyInitialized => {
            println!("Initialization already completed.");
        }
        InitOutcome::Initialized => {
            println!(
                "{} Initialized easy-memory in {}.",
                "✅".green(),
                ws.store_dir.display()
            );
            if let Some(file) = rules_file {
                println!("   Rules: {}", file.display());
            }
            println!("\nNext steps:");
            println!("  emem write --content \"Your first note\" --factual true --ref-level medium");
            println!("  emem search keyword");
        }
    }

    Ok(())
}
