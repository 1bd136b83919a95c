//! `emem search` command
//!
//! Keyword search across every log file, ranked factual-first, then by
//! ref-level, then newest.
//!
//! # Usage
//! ```bash
//! emem search cache timeout
//! emem search deploy --max-results 10
//! emem search deploy --format json
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

use super::utils::Workspace;
use super::GlobalArgs;
use crate::core::search::SearchOutcome;

pub const EMPTY_LOG_MESSAGE: &str = "No log entries for today. Created an empty log file; \
please continue with the remaining task steps.";

pub const NO_MATCH_MESSAGE: &str = "No matching entries found for the provided keywords.";

pub const IMPORTANT_REMINDER: &str = "IMPORTANT NOTICE: The foregoing search history may be \
used as material reference for this task; however, should any subsequent work disclose new \
information inconsistent with, superseding, or rendering any entry outdated, you are hereby \
required, prior to writing new logs or submitting this task, to correct or update the relevant \
entries using the appropriate tool scripts, or to delete them.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keywords (space-separated, any may match)
    #[arg(required = true, num_args = 1..)]
    pub keywords: Vec<String>,

    /// Maximum number of entries to return (default: search.default_limit)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub max_results: Option<i64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

pub fn run(args: SearchArgs, global: &GlobalArgs) -> Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(None);
    let max_results = args.max_results.unwrap_or(ws.config.search.default_limit);

    let outcome = log.search(&args.keywords, max_results)?;

    if outcome.is_empty_store() {
        log.store().touch(log.today())?;
    }

    match args.format {
        OutputFormat::Json => print_json(&outcome)?,
        OutputFormat::Pretty => print_pretty(&outcome),
    }

    Ok(())
}

fn print_pretty(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::EmptyStore => println!("{}", EMPTY_LOG_MESSAGE),
        SearchOutcome::NoMatches => println!("{}", NO_MATCH_MESSAGE),
        SearchOutcome::Matches(hits) => {
            for hit in hits {
                println!("{}", hit);
            }
            println!("{}", IMPORTANT_REMINDER);
        }
    }
}

fn print_json(outcome: &SearchOutcome) -> Result<()> {
    let status = match outcome {
        SearchOutcome::EmptyStore => "empty_store",
        SearchOutcome::NoMatches => "no_matches",
        SearchOutcome::Matches(_) => "matches",
    };
    let value = json!({
        "status": status,
        "results": outcome.hits(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
