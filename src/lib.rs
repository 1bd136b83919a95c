//! easy-memory - day-partitioned memory log for coding agents
//!
//! Short notes ("entries") are appended one per line to `YYYY-MM-DD.log`
//! files in a store directory, then searched, updated, or deleted by id.
//!
//! ## Key Concepts
//!
//! - **Entry line**: `[ID:..] [REF:..] [FACT:true|false] <content> [TIME:YYYY-MM-DD:HH:MM]`
//! - **Ranking**: factual first, then ref-level, then most recent
//! - **Unique ids**: an id seen twice is an error, never merged
//! - **Injected ambient state**: clock, id generator, and store directory are parameters

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub use core::entry::{MemoryEntry, Timestamp};
pub use core::memory::{EntryUpdate, MemoryLog};
pub use core::search::{SearchHit, SearchOutcome};
pub use core::store::LogStore;
pub use core::validate::ContentPolicy;
pub use error::MemoryError;
