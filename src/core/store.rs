//! Log store - date-partitioned text files
//!
//! # Layout
//! ```text
//! <base_dir>/
//!   init.log          initialization marker
//!   2024-05-02.log    one file per calendar day, one entry per line
//!   2024-05-01.log
//! ```
//!
//! Files are read and rewritten whole. Appends go through a separate
//! open-for-append path. There is no locking: concurrent writers to the
//! same day file race and the last write wins.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use super::entry::Timestamp;
use super::rules;
use super::Result;
use crate::error::MemoryError;

/// Marker whose presence means `init` completed
pub const MARKER_FILE: &str = "init.log";

const LOG_EXTENSION: &str = "log";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// What `initialize` found or did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized,
    AlreadyInitialized,
}

/// Options for [`LogStore::initialize`]
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Agent-instructions file that receives the rules block (skipped if `None`)
    pub rules_file: Option<PathBuf>,
    /// Re-run even if the marker exists
    pub force: bool,
}

/// Handle to a store directory
#[derive(Debug, Clone)]
pub struct LogStore {
    base_dir: PathBuf,
}

impl LogStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base_dir>/YYYY-MM-DD.log`
    pub fn path_for_date(&self, date: NaiveDate) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), LOG_EXTENSION))
    }

    pub fn marker_path(&self) -> PathBuf {
        self.base_dir.join(MARKER_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.marker_path().is_file()
    }

    /// Fail with [`MemoryError::Uninitialized`] unless the marker exists
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(MemoryError::Uninitialized {
                dir: self.base_dir.clone(),
            })
        }
    }

    /// Create the directory, write the rules block, then the marker stamped with `now`
    ///
    /// The marker is written last so an interrupted init leaves the store
    /// uninitialized.
    pub fn initialize(&self, opts: &InitOptions, now: NaiveDateTime) -> Result<InitOutcome> {
        if self.is_initialized() && !opts.force {
            debug!(dir = %self.base_dir.display(), "store already initialized");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        fs::create_dir_all(&self.base_dir)?;

        if let Some(rules_file) = &opts.rules_file {
            rules::inject_rules(rules_file, rules::RULES_BODY)?;
            debug!(file = %rules_file.display(), "rules block written");
        }

        fs::write(
            self.marker_path(),
            format!(
                "easy-memory initialized at {}\n",
                Timestamp::from_datetime(now)
            ),
        )?;

        info!(dir = %self.base_dir.display(), "store initialized");
        Ok(InitOutcome::Initialized)
    }

    /// All day files, most recent date first
    ///
    /// A missing base directory is an empty store, not an error.
    pub fn list_log_files(&self) -> Result<Vec<PathBuf>> {
        let dir = match fs::read_dir(&self.base_dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for item in dir {
            let item = item?;
            let is_log = item
                .file_name()
                .to_str()
                .and_then(parse_log_file_name)
                .is_some();
            if is_log && item.file_type()?.is_file() {
                files.push(item.path());
            }
        }

        // Zero-padded dates sort lexically
        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        debug!(count = files.len(), "listed log files");
        Ok(files)
    }

    pub fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Replace the whole file; non-empty output ends with a newline
    pub fn write_lines(&self, path: &Path, lines: &[String]) -> Result<()> {
        let mut output = lines.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        fs::write(path, output)?;
        debug!(file = %path.display(), lines = lines.len(), "rewrote log file");
        Ok(())
    }

    /// Append one line to the file for `date`, creating directory and file as needed
    pub fn append_line(&self, date: NaiveDate, line: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.path_for_date(date);

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;
        if !ends_with_newline(&mut file)? {
            debug!(file = %path.display(), "last line unterminated, adding newline");
            file.write_all(b"\n")?;
        }
        writeln!(file, "{}", line)?;

        debug!(file = %path.display(), "appended entry");
        Ok(path)
    }

    /// Create an empty file for `date` if none exists
    pub fn touch(&self, date: NaiveDate) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.path_for_date(date);
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(path)
    }
}

/// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Date of a `YYYY-MM-DD.log` file name, if it is one
pub fn parse_log_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(".log")?;
    if stem.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// File name component for display (`2024-05-01.log`)
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
