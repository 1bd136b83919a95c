//! Memory log - append, read, search, update, delete
//!
//! [`MemoryLog`] ties a [`LogStore`] to an injected clock and id generator and
//! applies the validation rules before anything touches disk. Update and
//! delete locate entries by scanning every file; an id found more than once
//! is reported, never resolved automatically.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::clock::{Clock, IdGenerator, SystemClock, UlidGenerator};
use super::entry::{MemoryEntry, Timestamp};
use super::search::{self, SearchOutcome};
use super::store::{self, InitOptions, InitOutcome, LogStore};
use super::validate::{self, ContentPolicy};
use super::Result;
use crate::error::MemoryError;

/// Fields to change in [`MemoryLog::update_entry`]; `None` keeps the old value
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub content: Option<String>,
    pub factual: Option<String>,
    pub ref_level: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.factual.is_none() && self.ref_level.is_none()
    }
}

/// An entry found by id, with where it lives
#[derive(Debug, Clone)]
pub struct LocatedEntry {
    pub path: PathBuf,
    pub line_index: usize,
    pub entry: MemoryEntry,
}

/// Result of [`MemoryLog::append_entry`]
#[derive(Debug, Clone)]
pub struct Appended {
    pub id: String,
    pub path: PathBuf,
}

/// Line counts for one day file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub file: String,
    /// Lines that decode as entries
    pub entries: usize,
    /// Lines kept as opaque text
    pub raw_lines: usize,
}

pub struct MemoryLog {
    store: LogStore,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    policy: ContentPolicy,
}

impl MemoryLog {
    /// System clock, ULID ids, UTF-8 content
    pub fn new(store: LogStore) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            ids: Box::new(UlidGenerator),
            policy: ContentPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_policy(mut self, policy: ContentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn policy(&self) -> ContentPolicy {
        self.policy
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Initialize the store, stamping the marker with the current time
    pub fn initialize(&self, opts: &InitOptions) -> Result<InitOutcome> {
        self.store.initialize(opts, self.clock.now())
    }

    /// Validate and append a new entry to today's file
    ///
    /// Does not require initialization; the directory is created on demand.
    pub fn append_entry(&self, content: &str, factual: &str, ref_level: &str) -> Result<Appended> {
        let content = validate::normalize_content(content, self.policy)?;
        let factual = validate::normalize_bool(factual)?;
        let ref_level = validate::validate_ref_level(ref_level)?;

        let now = self.clock.now();
        let entry = MemoryEntry::new(
            self.ids.next_id(),
            ref_level,
            factual,
            content,
            Timestamp::from_datetime(now),
        );

        let path = self.store.append_line(now.date(), &entry.encode())?;
        info!(id = %entry.id, file = %path.display(), "appended entry");

        Ok(Appended { id: entry.id, path })
    }

    /// Raw lines of the file for `date`; `None` if that day has no file
    pub fn read_entries_for(&self, date: NaiveDate) -> Result<Option<Vec<String>>> {
        self.store.ensure_initialized()?;

        let path = self.store.path_for_date(date);
        if !path.is_file() {
            debug!(file = %path.display(), "no log file for date");
            return Ok(None);
        }
        self.store.read_lines(&path).map(Some)
    }

    /// Ranked keyword search across the whole store
    pub fn search(&self, keywords: &[String], max_results: i64) -> Result<SearchOutcome> {
        self.store.ensure_initialized()?;
        search::search(&self.store, keywords, max_results)
    }

    /// Per-file counts, most recent file first
    pub fn stats(&self) -> Result<Vec<FileStats>> {
        self.store.ensure_initialized()?;

        let mut stats = Vec::new();
        for path in self.store.list_log_files()? {
            let lines = self.store.read_lines(&path)?;
            let entries = lines
                .iter()
                .filter(|l| MemoryEntry::decode(l).is_some())
                .count();
            stats.push(FileStats {
                file: store::file_name(&path),
                entries,
                raw_lines: lines.len() - entries,
            });
        }
        Ok(stats)
    }

    /// Every line whose decoded id equals `id`
    pub fn find_by_id(&self, id: &str) -> Result<Vec<LocatedEntry>> {
        let mut found = Vec::new();

        for path in self.store.list_log_files()? {
            let lines = self.store.read_lines(&path)?;
            for (line_index, line) in lines.iter().enumerate() {
                if let Some(entry) = MemoryEntry::decode(line) {
                    if entry.id == id {
                        found.push(LocatedEntry {
                            path: path.clone(),
                            line_index,
                            entry,
                        });
                    }
                }
            }
        }

        Ok(found)
    }

    /// Exactly one match, or `NotFound` / `AmbiguousId`
    fn locate_unique(&self, id: &str) -> Result<LocatedEntry> {
        let mut found = self.find_by_id(id)?;
        match found.len() {
            0 => Err(MemoryError::NotFound { id: id.to_string() }),
            1 => Ok(found.remove(0)),
            count => {
                warn!(id, count, "duplicate entry id across log files");
                Err(MemoryError::AmbiguousId {
                    id: id.to_string(),
                    count,
                })
            }
        }
    }

    /// Change some fields of an entry and restamp it with the current time
    pub fn update_entry(&self, id: &str, update: &EntryUpdate) -> Result<MemoryEntry> {
        self.store.ensure_initialized()?;

        if update.is_empty() {
            return Err(MemoryError::validation(
                "Provide at least one field to update.",
            ));
        }

        // Validate before scanning
        let content = update
            .content
            .as_deref()
            .map(|c| validate::normalize_content(c, self.policy))
            .transpose()?;
        let factual = update
            .factual
            .as_deref()
            .map(validate::normalize_bool)
            .transpose()?;
        let ref_level = update
            .ref_level
            .as_deref()
            .map(validate::validate_ref_level)
            .transpose()?;

        let located = self.locate_unique(id)?;
        let old = located.entry;

        let entry = MemoryEntry::new(
            old.id,
            ref_level.unwrap_or(old.ref_level),
            factual.unwrap_or(old.factual),
            content.unwrap_or(old.content),
            Timestamp::from_datetime(self.clock.now()),
        );

        let mut lines = self.store.read_lines(&located.path)?;
        let slot = lines
            .get_mut(located.line_index)
            .ok_or_else(|| MemoryError::NotFound { id: id.to_string() })?;
        *slot = entry.encode();
        self.store.write_lines(&located.path, &lines)?;

        info!(id, file = %located.path.display(), "updated entry");
        Ok(entry)
    }

    /// Remove an entry's line; the file stays even if it becomes empty
    pub fn delete_entry(&self, id: &str) -> Result<MemoryEntry> {
        self.store.ensure_initialized()?;

        let located = self.locate_unique(id)?;

        let mut lines = self.store.read_lines(&located.path)?;
        if located.line_index >= lines.len() {
            return Err(MemoryError::NotFound { id: id.to_string() });
        }
        lines.remove(located.line_index);
        self.store.write_lines(&located.path, &lines)?;

        info!(id, file = %located.path.display(), "deleted entry");
        Ok(located.entry)
    }
}
