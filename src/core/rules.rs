//! Agent rules block
//!
//! `emem init` writes usage rules into the host project's agent-instructions
//! file (`AGENTS.md` by default). The block is fenced by HTML comments so a
//! later init replaces it instead of appending a second copy.

use std::fs;
use std::io;
use std::path::Path;

pub const BEGIN_MARKER: &str = "<!-- easy-memory:begin -->";
pub const END_MARKER: &str = "<!-- easy-memory:end -->";

/// Rules injected between the markers
pub const RULES_BODY: &str = "\
## Memory log (easy-memory)

- Before starting a task, run `emem search <keywords>` with a few English keywords for the task.
- Treat results as reference material. Entries with `[FACT:false]` are provisional.
- Log durable findings with `emem write --content \"...\" --factual true|false --ref-level low|medium|high|critical`.
- Keep each entry to one line of plain English.
- When new information contradicts or supersedes an entry, fix it with `emem update --id <id>` or remove it with `emem delete --id <id>` before finishing.
- Never edit files under the memory directory by hand.";

/// Render the fenced block
pub fn render_block(body: &str) -> String {
    format!("{}\n{}\n{}\n", BEGIN_MARKER, body.trim_end(), END_MARKER)
}

/// Insert or replace the fenced block inside `existing`
pub fn upsert_block(existing: &str, body: &str) -> String {
    let block = render_block(body);

    if let Some(start) = existing.find(BEGIN_MARKER) {
        if let Some(end_rel) = existing[start..].find(END_MARKER) {
            let mut end = start + end_rel + END_MARKER.len();
            if existing[end..].starts_with('\n') {
                end += 1;
            }
            return format!("{}{}{}", &existing[..start], block, &existing[end..]);
        }
    }

    if existing.is_empty() {
        block
    } else if existing.ends_with("\n\n") {
        format!("{}{}", existing, block)
    } else if existing.ends_with('\n') {
        format!("{}\n{}", existing, block)
    } else {
        format!("{}\n\n{}", existing, block)
    }
}

/// Write the rules block into `path`, creating the file if needed
pub fn inject_rules(path: &Path, body: &str) -> io::Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let updated = upsert_block(&existing, body);
    if updated != existing {
        fs::write(path, updated)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upsert_into_empty() {
        let out = upsert_block("", "rules");
        assert_eq!(out, format!("{}\nrules\n{}\n", BEGIN_MARKER, END_MARKER));
    }

    #[test]
    fn test_upsert_appends_after_existing_text() {
        let out = upsert_block("# Project\nSome notes", "rules");
        assert!(out.starts_with("# Project\nSome notes\n\n"));
        assert!(out.ends_with(&format!("{}\n", END_MARKER)));
    }

    #[test]
    fn test_upsert_replaces_existing_block() {
        let first = upsert_block("# Project\n", "old rules");
        let with_tail = format!("{}\n## Other\n", first);
        let second = upsert_block(&with_tail, "new rules");

        assert!(second.contains("new rules"));
        assert!(!second.contains("old rules"));
        assert_eq!(second.matches(BEGIN_MARKER).count(), 1);
        assert!(second.ends_with("## Other\n"));
    }

    #[test]
    fn test_inject_rules_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("AGENTS.md");
        fs::write(&path, "# Agents\n").unwrap();

        inject_rules(&path, RULES_BODY).unwrap();
        let once = fs::read_to_string(&path).unwrap();
        inject_rules(&path, RULES_BODY).unwrap();
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        assert!(once.starts_with("# Agents\n"));
        assert!(once.contains("emem search"));
    }
}
