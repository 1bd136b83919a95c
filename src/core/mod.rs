//! Core module - Business logic
//!
//! Entry codec, day-partitioned log store, validation rules, and the
//! search and mutation engines built on them.

pub mod clock;
pub mod entry;
pub mod memory;
pub mod rules;
pub mod search;
pub mod store;
pub mod validate;

/// Result type of every core operation
pub type Result<T> = std::result::Result<T, crate::error::MemoryError>;
