//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a snapshot file and verify outputs.
//! HOME points at a temporary directory so the user's config is untouched.

use std::path::Path;
use std::process::Command;

const SNAPSHOT: &str = r#"[
    {"title_line": "11MAT (Maths) - JSM", "start": "9:00 AM", "finish": "10:30 AM"},
    {"title_line": "11ENG (English)", "start": "10:00 AM", "finish": "11:30 AM"},
    {"title_line": "11HIS (History)", "start": "10:00 AM", "finish": "11:30 AM"},
    {"title_line": "11DRA (Drama)", "start": "1:00 PM", "finish": "1:00 PM"}
]"#;

const DIRECTORY: &str = r#"{"staff": [{"code": "JSM", "name": "Jordan Smith"}]}"#;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_classtrack-cli"))
        .env("HOME", home)
        .env_remove("CLASSTRACK_ENV")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn write_fixtures(dir: &Path) -> (String, String) {
    let snapshot = dir.join("snapshot.json");
    let directory = dir.join("directory.json");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();
    std::fs::write(&directory, DIRECTORY).unwrap();
    (
        snapshot.to_string_lossy().to_string(),
        directory.to_string_lossy().to_string(),
    )
}

#[test]
fn test_layout_text() {
    let home = tempfile::tempdir().unwrap();
    let (snapshot, directory) = write_fixtures(home.path());

    let (stdout, stderr, code) =
        run_cli(home.path(), &["layout", &snapshot, "--directory", &directory]);
    assert_eq!(code, 0, "layout failed: {stderr}");
    assert!(stdout.contains("09:00-10:30  lane 1/3  Maths | Jordan Smith"));
    assert!(stdout.contains("lane 3/3  History"));
    assert!(stderr.contains("skipped entry 3"));
}

#[test]
fn test_layout_json() {
    let home = tempfile::tempdir().unwrap();
    let (snapshot, _) = write_fixtures(home.path());

    let (stdout, stderr, code) = run_cli(home.path(), &["layout", &snapshot, "--json"]);
    assert_eq!(code, 0, "layout --json failed: {stderr}");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["max_lane_count"], 3);
    assert_eq!(parsed["events"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["events"][1]["entry"]["lane"], 1);
    assert_eq!(parsed["rejected"][0]["index"], 3);
}

#[test]
fn test_layout_empty_snapshot() {
    let home = tempfile::tempdir().unwrap();
    let snapshot = home.path().join("empty.json");
    std::fs::write(&snapshot, "[]").unwrap();

    let (stdout, stderr, code) = run_cli(home.path(), &["layout", &snapshot.to_string_lossy()]);
    assert_eq!(code, 0, "layout failed: {stderr}");
    assert_eq!(stdout.trim(), "no classes");
}

#[test]
fn test_now_at_fixed_time() {
    let home = tempfile::tempdir().unwrap();
    let (snapshot, _) = write_fixtures(home.path());

    let (stdout, stderr, code) = run_cli(home.path(), &["now", &snapshot, "--at", "10:15"]);
    assert_eq!(code, 0, "now failed: {stderr}");
    assert!(stdout.contains("now:  English (10:00-11:30)"));
    assert!(stdout.contains("next: -"));
}

#[test]
fn test_now_rejects_bad_time() {
    let home = tempfile::tempdir().unwrap();
    let (snapshot, _) = write_fixtures(home.path());

    let (_, stderr, code) = run_cli(home.path(), &["now", &snapshot, "--at", "teatime"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_missing_snapshot_fails() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.json");
    let (_, stderr, code) = run_cli(home.path(), &["layout", &missing.to_string_lossy()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("cannot read"));
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();

    let (_, stderr, code) =
        run_cli(home.path(), &["config", "set", "timeline.lane_width", "uniform"]);
    assert_eq!(code, 0, "config set failed: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "timeline.lane_width"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "uniform");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "timeline.nope"]);
    assert_ne!(code, 0);
}
