//! `emem delete` command
//!
//! Removes one entry by ID. The day file is kept even when it ends up empty.
//!
//! # Usage
//! ```bash
//! emem delete --id 01hq3k2jn5...
//! ```

use anyhow::Result;
use clap::Args;

use super::utils::Workspace;
use super::GlobalArgs;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry ID to delete
    #[arg(long)]
    pub id: String,
}

pub fn run(args: DeleteArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(None);

    log.delete_entry(&args.id)?;

    println!("Deleted entry ID: {}", args.id);
    Ok(())
}
