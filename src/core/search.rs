//! Search - linear keyword scan over every log file
//!
//! Ranking, highest first:
//! 1. factual entries before provisional ones
//! 2. ref-level score (`low`=1 .. `critical`=4, else the integer value, else 0)
//! 3. timestamp, newest first
//!
//! Ties keep discovery order: newest file first, then line order. Lines that
//! do not decode are matched on their raw text and rank lowest.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::entry::MemoryEntry;
use super::store::{self, LogStore};
use super::validate::validate_max_results;
use super::Result;
use crate::error::MemoryError;

/// Ranking score for a ref-level tag
pub fn ref_level_score(value: &str) -> i64 {
    match value.trim().to_lowercase().as_str() {
        "low" => 1,
        "medium" => 2,
        "high" => 3,
        "critical" => 4,
        other => integer_score(other).unwrap_or(0),
    }
}

/// Signed decimal integer, digits optionally grouped with single `_`
///
/// Values beyond the `i64` range saturate instead of scoring 0.
fn integer_score(value: &str) -> Option<i64> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let well_formed = !digits.is_empty()
        && digits.split('_').all(|group| {
            !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit())
        });
    if !well_formed {
        return None;
    }

    let plain: String = digits.chars().filter(|c| *c != '_').collect();
    Some(match (negative, plain.parse::<i64>()) {
        (false, Ok(v)) => v,
        (false, Err(_)) => i64::MAX,
        (true, Ok(v)) => -v,
        (true, Err(_)) => i64::MIN,
    })
}

/// Sort key; compared lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    factual: u8,
    ref_score: i64,
    // None (unparseable) sorts before every real time
    time: Option<NaiveDateTime>,
}

impl RankKey {
    fn of(entry: Option<&MemoryEntry>) -> Self {
        match entry {
            Some(e) => Self {
                factual: u8::from(e.factual),
                ref_score: ref_level_score(&e.ref_level),
                time: e.timestamp.to_datetime(),
            },
            None => Self {
                factual: 0,
                ref_score: 0,
                time: None,
            },
        }
    }
}

/// One matching line
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Log file name, e.g. `2024-05-01.log`
    pub file: String,
    /// Line exactly as stored
    pub line: String,
    /// Decoded entry, if the line follows the grammar
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<MemoryEntry>,
    #[serde(skip)]
    key: RankKey,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.line)
    }
}

/// Result of a search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// No log files, or none of them holds a single line
    EmptyStore,
    /// Entries exist but none matched
    NoMatches,
    /// Ranked hits, truncated to the requested size
    Matches(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Matches(hits) => hits,
            _ => &[],
        }
    }

    pub fn is_empty_store(&self) -> bool {
        matches!(self, SearchOutcome::EmptyStore)
    }
}

/// Lower-case keywords, dropping blanks
fn normalize_keywords(keywords: &[String]) -> Result<Vec<String>> {
    let normalized: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if normalized.is_empty() {
        return Err(MemoryError::validation("Provide at least one keyword."));
    }
    Ok(normalized)
}

/// Scan all log files for lines matching any keyword (case-insensitive)
pub fn search(store: &LogStore, keywords: &[String], max_results: i64) -> Result<SearchOutcome> {
    let keywords = normalize_keywords(keywords)?;
    let max_results = validate_max_results(max_results)?;

    let files = store.list_log_files()?;
    if files.is_empty() {
        return Ok(SearchOutcome::EmptyStore);
    }

    let mut hits = Vec::new();
    let mut has_any_lines = false;

    for path in &files {
        let lines = store.read_lines(path)?;
        if lines.iter().any(|l| !l.trim().is_empty()) {
            has_any_lines = true;
        }

        let file = store::file_name(path);
        for line in lines {
            let entry = MemoryEntry::decode(&line);
            let haystack = match &entry {
                Some(e) => e.content.to_lowercase(),
                None => line.to_lowercase(),
            };

            if keywords.iter().any(|k| haystack.contains(k.as_str())) {
                let key = RankKey::of(entry.as_ref());
                hits.push(SearchHit {
                    file: file.clone(),
                    line,
                    entry,
                    key,
                });
            }
        }
    }

    debug!(files = files.len(), matches = hits.len(), "search scan finished");

    if !has_any_lines {
        return Ok(SearchOutcome::EmptyStore);
    }
    if hits.is_empty() {
        return Ok(SearchOutcome::NoMatches);
    }

    // Stable sort keeps discovery order for equal keys
    hits.sort_by(|a, b| b.key.cmp(&a.key));
    hits.truncate(max_results);

    Ok(SearchOutcome::Matches(hits))
}
