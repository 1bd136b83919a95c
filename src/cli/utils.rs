//! CLI utility functions
//!
//! Resolves configuration and the store directory once per invocation and
//! builds the [`MemoryLog`] every command works through.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use super::GlobalArgs;
use crate::config::Config;
use crate::core::memory::MemoryLog;
use crate::core::store::LogStore;
use crate::core::validate::ContentPolicy;

/// Loaded config plus the resolved store directory
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config: Config,
    pub store_dir: PathBuf,
}

impl Workspace {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let (config, store_dir) =
            Config::resolve(global.config.as_deref(), global.dir.as_deref())?;
        debug!(store = %store_dir.display(), "resolved store directory");
        Ok(Self { config, store_dir })
    }

    pub fn store(&self) -> LogStore {
        LogStore::new(&self.store_dir)
    }

    /// Memory log with the system clock and the configured charset policy
    ///
    /// A `--charset` flag on the command wins over the config file.
    pub fn memory_log(&self, charset: Option<ContentPolicy>) -> MemoryLog {
        let policy = charset.unwrap_or(self.config.content.charset);
        let log = MemoryLog::new(self.store()).with_policy(policy);
        debug!(policy = %log.policy(), "content charset policy");
        log
    }
}

/// clap value parser for `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}
