//! `emem write` command
//!
//! Appends one entry to today's log file.
//!
//! # Usage
//! ```bash
//! emem write --content "Build uses cache layer v2" --factual true --ref-level high
//! emem write --content "Maybe flaky on CI" --factual false --ref-level low --charset ascii
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::Workspace;
use super::GlobalArgs;
use crate::core::validate::ContentPolicy;

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Entry text (single line)
    #[arg(long)]
    pub content: String,

    /// Whether the entry is factual: true or false
    #[arg(long)]
    pub factual: String,

    /// Reference level (e.g., low, medium, high, critical)
    #[arg(long)]
    pub ref_level: String,

    /// Override the configured content charset policy
    #[arg(long, value_enum)]
    pub charset: Option<ContentPolicy>,
}

pub fn run(args: WriteArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(args.charset);

    let appended = log.append_entry(&args.content, &args.factual, &args.ref_level)?;

    println!("Appended entry ID: {}", appended.id);
    Ok(())
}
