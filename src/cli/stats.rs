//! Stats command - Show per-file entry counts

use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::Workspace;
use super::GlobalArgs;
use crate::core::memory::FileStats;

/// Stats command arguments
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Raw lines")]
    raw_lines: usize,
}

impl From<&FileStats> for StatsRow {
    fn from(s: &FileStats) -> Self {
        Self {
            file: s.file.clone(),
            entries: s.entries,
            raw_lines: s.raw_lines,
        }
    }
}

/// Execute stats command
pub fn execute(args: StatsArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let ws = Workspace::load(global)?;
    let log = ws.memory_log(None);

    let stats = log.stats()?;
    let total_entries: usize = stats.iter().map(|s| s.entries).sum();
    let total_raw: usize = stats.iter().map(|s| s.raw_lines).sum();

    if args.json {
        let json = serde_json::json!({
            "store": ws.store_dir.display().to_string(),
            "files": stats,
            "total_entries": total_entries,
            "total_raw_lines": total_raw,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("📊 Memory Log Statistics\n");
    if stats.is_empty() {
        println!("  No log files yet.");
    } else {
        let rows: Vec<StatsRow> = stats.iter().map(StatsRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
    println!("\n  Total entries:    {}", total_entries);
    println!("  Raw lines:        {}", total_raw);
    println!("\n📁 Store: {}", ws.store_dir.display());

    Ok(())
}
