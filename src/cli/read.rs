//! `emem read` command
//!
//! Prints one day's log file as stored.
//!
//! # Usage
//! ```bash
//! emem read                    # today
//! emem read --date 2024-05-01
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use super::utils::{parse_date, Workspace};
use super::GlobalArgs;
use crate::core::store;

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Day to print (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: ReadArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(None);
    let date = args.date.unwrap_or_else(|| log.today());

    match log.read_entries_for(date)? {
        Some(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        None => {
            let name = store::file_name(&log.store().path_for_date(date));
            println!("No log file for {}: {}", date, name);
        }
    }

    Ok(())
}
