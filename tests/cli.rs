use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

struct Project {
    root: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            root: tempdir().expect("create temp project"),
        }
    }

    fn store(&self) -> PathBuf {
        self.root.path().join(".easy-memory")
    }

    fn emem(&self) -> Command {
        let mut cmd = Command::cargo_bin("emem").expect("emem binary");
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("NO_COLOR", "1")
            .env_remove("EMEM_DIR")
            .env_remove("EMEM_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--dir")
            .arg(self.store());
        cmd
    }

    fn init(&self) {
        self.emem().arg("init").assert().success();
    }

    fn write(&self, content: &str, factual: &str, ref_level: &str) -> String {
        let output = self
            .emem()
            .args(["write", "--content", content, "--factual", factual, "--ref-level", ref_level])
            .output()
            .expect("run emem write");
        assert!(output.status.success(), "write failed: {:?}", output);
        let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
        stdout
            .trim()
            .strip_prefix("Appended entry ID: ")
            .expect("id line")
            .to_string()
    }

    fn log_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = fs::read_dir(self.store())
            .expect("read store")
            .map(|e| e.expect("dir entry").path())
            .filter(|p| is_day_file(p))
            .collect();
        files.sort();
        files
    }
}

fn is_day_file(path: &Path) -> bool {
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    name.len() == "2024-01-01.log".len() && name.ends_with(".log") && name != "init.log"
}

#[test]
fn init_creates_marker_and_rules() {
    let project = Project::new();

    project
        .emem()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized easy-memory"));

    assert!(project.store().join("init.log").is_file());
    let agents = fs::read_to_string(project.root.path().join("AGENTS.md")).unwrap();
    assert!(agents.contains("<!-- easy-memory:begin -->"));
    assert!(agents.contains("emem search"));

    project
        .emem()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization already completed."));
}

#[test]
fn init_keeps_existing_agents_content() {
    let project = Project::new();
    let agents_path = project.root.path().join("AGENTS.md");
    fs::write(&agents_path, "# Project rules\n\nBe nice.\n").unwrap();

    project.init();
    project.emem().args(["init", "--force"]).assert().success();

    let agents = fs::read_to_string(&agents_path).unwrap();
    assert!(agents.starts_with("# Project rules\n\nBe nice.\n"));
    assert_eq!(agents.matches("<!-- easy-memory:begin -->").count(), 1);
}

#[test]
fn write_then_search_returns_single_line() {
    let project = Project::new();
    project.init();

    let id = project.write("Build uses cache layer v2", "true", "high");

    let files = project.log_files();
    assert_eq!(files.len(), 1);
    let text = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with(&format!("[ID:{}] [REF:high] [FACT:true] Build uses cache layer v2 [TIME:", id)));

    let file_name = files[0].file_name().unwrap().to_string_lossy().to_string();
    project
        .emem()
        .args(["search", "cache", "--max-results", "5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("{}: {}", file_name, text.trim_end())))
        .stdout(predicate::str::contains("IMPORTANT NOTICE"));
}

#[test]
fn read_prints_today() {
    let project = Project::new();
    project.init();
    project.write("worker pool size is 8", "true", "medium");

    project
        .emem()
        .arg("read")
        .assert()
        .success()
        .stdout(predicate::str::contains("worker pool size is 8"));

    project
        .emem()
        .args(["read", "--date", "1999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No log file for 1999-01-01: 1999-01-01.log"));
}

#[test]
fn search_requires_init() {
    let project = Project::new();

    project
        .emem()
        .args(["search", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("emem init"));
}

#[test]
fn write_does_not_require_init() {
    let project = Project::new();
    project.write("note before init", "false", "low");
    assert_eq!(project.log_files().len(), 1);
    assert!(!project.store().join("init.log").exists());
}

#[test]
fn search_empty_store_creates_today_file() {
    let project = Project::new();
    project.init();
    assert!(project.log_files().is_empty());

    project
        .emem()
        .args(["search", "anything"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No log entries for today"));

    assert_eq!(project.log_files().len(), 1);
}

#[test]
fn search_without_match_is_distinct_from_empty() {
    let project = Project::new();
    project.init();
    project.write("deploys go through canary", "true", "high");

    project
        .emem()
        .args(["search", "kubernetes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No matching entries found for the provided keywords.",
        ));
}

#[test]
fn search_limit_keeps_highest_ref_level() {
    let project = Project::new();
    project.init();
    project.write("client timeout noticed once", "true", "low");
    let critical = project.write("gateway timeout is 30s", "true", "critical");

    let output = project
        .emem()
        .args(["search", "timeout", "-n", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let results: Vec<&str> = stdout.lines().filter(|l| l.contains("[ID:")).collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].contains(&format!("[ID:{}]", critical)));
}

#[test]
fn search_rejects_non_positive_limit() {
    let project = Project::new();
    project.init();

    project
        .emem()
        .args(["search", "x", "--max-results", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive integer"));

    project
        .emem()
        .args(["search", "x", "--max-results", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn search_json_output() {
    let project = Project::new();
    project.init();
    let id = project.write("retry budget is 3", "false", "medium");

    let output = project
        .emem()
        .args(["search", "retry", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["status"], "matches");
    assert_eq!(value["results"][0]["entry"]["id"], id.as_str());
    assert_eq!(value["results"][0]["entry"]["factual"], false);
}

#[test]
fn update_changes_only_requested_fields() {
    let project = Project::new();
    project.init();
    let id = project.write("cache ttl is 60s", "true", "low");

    project
        .emem()
        .args(["update", "--id", &id, "--ref-level", "critical"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated entry ID: {}", id)));

    let text = fs::read_to_string(&project.log_files()[0]).unwrap();
    assert!(text.starts_with(&format!(
        "[ID:{}] [REF:critical] [FACT:true] cache ttl is 60s [TIME:",
        id
    )));
}

#[test]
fn update_requires_a_field() {
    let project = Project::new();
    project.init();
    let id = project.write("x", "true", "low");

    project
        .emem()
        .args(["update", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one field"));
}

#[test]
fn delete_then_search_finds_nothing() {
    let project = Project::new();
    project.init();
    project.write("keep this line", "true", "low");
    let id = project.write("flaky auth test", "false", "low");

    project
        .emem()
        .args(["delete", "--id", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted entry ID: {}", id)));

    project
        .emem()
        .args(["search", "flaky"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching entries"));

    project
        .emem()
        .args(["delete", "--id", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn duplicate_ids_block_mutation() {
    let project = Project::new();
    project.init();
    let line = "[ID:dup] [REF:low] [FACT:true] duplicated [TIME:2024-01-01:10:00]\n";
    fs::write(project.store().join("2024-01-01.log"), line).unwrap();
    fs::write(project.store().join("2024-01-02.log"), line).unwrap();

    project
        .emem()
        .args(["update", "--id", "dup", "--content", "fixed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("appears 2 times"));

    project
        .emem()
        .args(["delete", "--id", "dup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refine the logs manually"));
}

#[test]
fn write_validation_errors() {
    let project = Project::new();
    project.init();

    project
        .emem()
        .args(["write", "--content", "x", "--factual", "maybe", "--ref-level", "low"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("factual must be 'true' or 'false'."));

    project
        .emem()
        .args(["write", "--content", "x", "--factual", "true", "--ref-level", "very high"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ref-level must match"));

    project
        .emem()
        .args([
            "write", "--content", "café opens at 8", "--factual", "true", "--ref-level", "low",
            "--charset", "ascii",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ASCII"));

    assert!(project.log_files().is_empty());
}

#[test]
fn stats_json_counts_entries() {
    let project = Project::new();
    project.init();
    project.write("one", "true", "low");
    project.write("two", "true", "low");

    let output = project.emem().args(["stats", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_entries"], 2);
    assert_eq!(value["total_raw_lines"], 0);
}

#[test]
fn config_default_limit_applies_to_search() {
    let project = Project::new();
    project.init();
    for n in 1..=3 {
        project.write(&format!("alpha note {}", n), "true", "low");
    }

    project
        .emem()
        .args(["config", "search.default_limit", "1"])
        .assert()
        .success();

    project
        .emem()
        .args(["config", "search.default_limit"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));

    let output = project.emem().args(["search", "alpha"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().filter(|l| l.contains("[ID:")).count(), 1);
}

#[test]
fn config_rejects_invalid_charset() {
    let project = Project::new();
    project.init();

    project
        .emem()
        .args(["config", "content.charset", "latin1"])
        .assert()
        .failure();
    assert!(!project.store().join("config.toml").exists());
}
