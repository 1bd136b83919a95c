//! `emem update` command
//!
//! Rewrites one entry in place. Unspecified fields keep their value; the
//! timestamp is always refreshed.
//!
//! # Usage
//! ```bash
//! emem update --id 01hq3k2jn5... --ref-level critical
//! emem update --id 01hq3k2jn5... --content "Timeout is 60s" --factual true
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::Workspace;
use super::GlobalArgs;
use crate::core::memory::EntryUpdate;
use crate::core::validate::ContentPolicy;

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Entry ID to update
    #[arg(long)]
    pub id: String,

    /// New content (single line)
    #[arg(long)]
    pub content: Option<String>,

    /// Whether the entry is factual: true or false
    #[arg(long)]
    pub factual: Option<String>,

    /// Reference level (e.g., low, medium, high, critical)
    #[arg(long)]
    pub ref_level: Option<String>,

    /// Override the configured content charset policy
    #[arg(long, value_enum)]
    pub charset: Option<ContentPolicy>,
}

pub fn run(args: UpdateArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(args.charset);

    let update = EntryUpdate {
        content: args.content,
        factual: args.factual,
        ref_level: args.ref_level,
    };
    log.update_entry(&args.id, &update)?;

    println!("Updated entry ID: {}", args.id);
    Ok(())
}
