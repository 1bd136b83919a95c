//! Entry - one memory record per log line
//!
//! # Line grammar
//! ```text
//! [ID:<id>] [REF:<ref_level>] [FACT:true|false] <content> [TIME:YYYY-MM-DD:HH:MM]
//! ```
//!
//! The parser is anchored on both ends, so `[TIME:...]` is always the last
//! bracketed group on the line and `<content>` may contain anything except
//! a line break. Lines that do not match are not errors: the store keeps them
//! and search treats them as opaque text.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// strftime format of the `[TIME:...]` field (minute granularity)
pub const TIME_FORMAT: &str = "%Y-%m-%d:%H:%M";

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\[ID:(?P<id>[^\]]+)\] ",
        r"\[REF:(?P<ref>[^\]]+)\] ",
        r"\[FACT:(?P<factual>true|false)\] ",
        r"(?P<content>.*) ",
        r"\[TIME:(?P<ts>[0-9]{4}-[0-9]{2}-[0-9]{2}:[0-9]{2}:[0-9]{2})\]$",
    ))
    .expect("entry grammar is a valid regex")
});

/// Wall-clock time of an entry, kept as the exact text found on disk
///
/// Text that has the right shape but is not a real date (e.g. month 13)
/// still round-trips; [`Timestamp::to_datetime`] returns `None` for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.format(TIME_FORMAT).to_string())
    }

    /// Accept text of the form `YYYY-MM-DD:HH:MM` (digits only, not range-checked)
    pub fn parse(s: &str) -> Option<Self> {
        let well_formed = s.len() == 16
            && s.bytes().enumerate().all(|(i, b)| match i {
                4 | 7 => b == b'-',
                10 | 13 => b == b':',
                _ => b.is_ascii_digit(),
            });
        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.0, TIME_FORMAT).ok()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A memory entry - one logged fact or provisional note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Opaque identifier, unique across the whole store
    pub id: String,

    /// Trust/importance tag (`low|medium|high|critical` or any `[A-Za-z0-9._-]+`)
    pub ref_level: String,

    /// Established fact (true) or speculative note (false)
    pub factual: bool,

    /// Single-line text
    pub content: String,

    /// Last write time
    pub timestamp: Timestamp,
}

impl MemoryEntry {
    pub fn new(
        id: impl Into<String>,
        ref_level: impl Into<String>,
        factual: bool,
        content: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            ref_level: ref_level.into(),
            factual,
            content: content.into(),
            timestamp,
        }
    }

    /// Serialize to a single log line (no trailing newline)
    pub fn encode(&self) -> String {
        encode(
            &self.id,
            &self.ref_level,
            self.factual,
            &self.content,
            &self.timestamp,
        )
    }

    /// Parse a log line; `None` if it does not follow the grammar exactly
    pub fn decode(line: &str) -> Option<Self> {
        let caps = ENTRY_RE.captures(line.trim())?;
        Some(Self {
            id: caps["id"].to_string(),
            ref_level: caps["ref"].to_string(),
            factual: &caps["factual"] == "true",
            content: caps["content"].to_string(),
            timestamp: Timestamp::parse(&caps["ts"])?,
        })
    }
}

impl fmt::Display for MemoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Build the on-disk line for the given fields
pub fn encode(
    id: &str,
    ref_level: &str,
    factual: bool,
    content: &str,
    timestamp: &Timestamp,
) -> String {
    format!(
        "[ID:{}] [REF:{}] [FACT:{}] {} [TIME:{}]",
        id, ref_level, factual, content, timestamp
    )
}
