//! Validation rules for caller-supplied fields
//!
//! Each rule either returns the normalized value or a
//! [`MemoryError::Validation`] with a human-readable reason.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

use super::Result;

/// Which characters entry content may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentPolicy {
    /// Any UTF-8 text
    #[default]
    Utf8,
    /// Code points below 128 only
    Ascii,
}

impl fmt::Display for ContentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentPolicy::Utf8 => write!(f, "utf8"),
            ContentPolicy::Ascii => write!(f, "ascii"),
        }
    }
}

/// Parse `true`/`false` (case-insensitive, surrounding whitespace ignored)
pub fn normalize_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MemoryError::validation(
            "factual must be 'true' or 'false'.",
        )),
    }
}

/// Non-empty and restricted to `[A-Za-z0-9._-]`
pub fn validate_ref_level(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(MemoryError::validation(
            "ref-level must be a non-empty string.",
        ));
    }

    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');
    if !valid {
        return Err(MemoryError::validation(
            "ref-level must match [A-Za-z0-9._-]+.",
        ));
    }

    Ok(value.to_string())
}

pub fn ensure_single_line(text: &str, label: &str) -> Result<()> {
    if text.contains(['\n', '\r']) {
        return Err(MemoryError::validation(format!(
            "{} must be a single line.",
            label
        )));
    }
    Ok(())
}

pub fn ensure_ascii(text: &str, label: &str) -> Result<()> {
    if !text.is_ascii() {
        return Err(MemoryError::validation(format!(
            "{} must be English ASCII only.",
            label
        )));
    }
    Ok(())
}

/// Trim content and check it against the line grammar and the charset policy
pub fn normalize_content(raw: &str, policy: ContentPolicy) -> Result<String> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(MemoryError::validation("content must not be empty."));
    }

    ensure_single_line(content, "content")?;
    if policy == ContentPolicy::Ascii {
        ensure_ascii(content, "content")?;
    }

    Ok(content.to_string())
}

/// Result limit for search; must be a positive integer
pub fn validate_max_results(value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(MemoryError::validation(
            "max-results must be a positive integer.",
        ));
    }
    usize::try_from(value)
        .map_err(|_| MemoryError::validation("max-results is too large."))
}
