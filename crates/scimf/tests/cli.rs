//! CLI tests that drive the `scimf` binary.
//!
//! Every run gets an empty config directory so a user's own config file
//! cannot change the results.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn scimf(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scimf"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("SCIMF_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn run(args: &[&str]) -> Output {
    let home = TempDir::new().expect("failed to create temp dir");
    scimf(home.path())
        .args(args)
        .output()
        .expect("failed to run scimf")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// filter
// ============================================================================

#[test]
fn test_filter_prints_canonical_text() {
    let output = run(&["filter", "title pr AND userType eq \"Employee\""]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "(title pr and userType eq \"Employee\")\n");
}

#[test]
fn test_filter_tree() {
    let output = run(&["filter", "--tree", "not (emails[type eq \"work\"])"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "not\n  complex emails\n    type eq \"work\"\n"
    );
}

#[test]
fn test_filter_json() {
    let output = run(&["--json", "filter", "a pr or b eq 1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["filter"], "(a pr or b eq 1)");
    assert_eq!(value["tree"]["type"], "or");
    assert_eq!(value["tree"]["filters"][1]["value"], 1);
}

#[test]
fn test_filter_reads_stdin() {
    let home = TempDir::new().unwrap();
    let mut child = scimf(home.path())
        .arg("filter")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn scimf");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"userName sw \"J\"\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "userName sw \"J\"\n");
}

#[test]
fn test_filter_parse_error_shows_caret() {
    let output = run(&["filter", "userName eq \"john\")"]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains(
        "Error: parse error: no opening parenthesis matching closing parenthesis at position 18"
    ));
    assert!(err.contains("  userName eq \"john\")\n                    ^"));
}

#[test]
fn test_filter_parse_error_json_envelope() {
    let output = run(&["--json", "filter", "userName bad \"john\""]);
    assert_eq!(output.status.code(), Some(1));

    let value: Value = serde_json::from_str(&stderr(&output)).unwrap();
    assert_eq!(value["error"]["code"], "PARSE_ERROR");
    assert_eq!(value["error"]["position"], 9);
    assert!(value["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unrecognized attribute operator 'bad'"));
}

#[test]
fn test_quiet_filter_prints_nothing() {
    let output = run(&["--quiet", "filter", "title pr"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");

    let output = run(&["-q", "filter", "title"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("Error: parse error: unexpected end of filter string"));
}

// ============================================================================
// path
// ============================================================================

#[test]
fn test_path_prints_canonical_text() {
    let output = run(&["path", "emails[type eq \"work\"].value"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "emails[type eq \"work\"].value\n");
}

#[test]
fn test_path_json() {
    let output = run(&["--json", "path", "urn:extension:manager.displayName"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["tree"]["schema"], "urn:extension");
    assert_eq!(value["tree"]["elements"][0]["attribute"], "manager");
    assert_eq!(value["tree"]["elements"][1]["attribute"], "displayName");
}

#[test]
fn test_path_error() {
    let output = run(&["path", "name."]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unexpected end of path string"));
}

#[test]
fn test_quiet_path_prints_nothing() {
    let output = run(&["-q", "path", "name.familyName"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

// ============================================================================
// compare
// ============================================================================

#[test]
fn test_compare_equivalent_filters() {
    let output = run(&["compare", "a pr and (b pr or c pr)", "(c pr or b pr) and a pr"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "equivalent\n");
}

#[test]
fn test_compare_different_filters() {
    let output = run(&["--json", "compare", "a pr and b pr or c pr", "a pr and (b pr or c pr)"]);
    assert_eq!(output.status.code(), Some(1));

    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["equal"], false);
}

#[test]
fn test_quiet_compare_uses_exit_status() {
    let output = run(&["-q", "compare", "a pr", "b pr"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_file_limits_parser() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("limits.toml");
    fs::write(&config_path, "[parser]\nmax_depth = 1\n").unwrap();

    let output = scimf(home.path())
        .args(["--config", config_path.to_str().unwrap(), "filter", "a[b[c pr]]"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nesting exceeds the maximum depth of 1"));
}

#[test]
fn test_default_config_location() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("scimf");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[parser]\nmax_length = 4\n").unwrap();

    let output = scimf(home.path()).args(["filter", "title pr"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("input is 8 characters long, the limit is 4"));
}

#[test]
fn test_error_caret_is_colored_by_default() {
    let home = TempDir::new().unwrap();
    let output = scimf(home.path())
        .env_remove("NO_COLOR")
        .args(["filter", "userName eq \"john\")"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains('\u{1b}'));
}

#[test]
fn test_config_disables_error_colors() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("plain.toml");
    fs::write(&config_path, "[output]\ncolor = false\n").unwrap();

    let output = scimf(home.path())
        .env_remove("NO_COLOR")
        .env("SCIMF_CONFIG", &config_path)
        .args(["filter", "userName eq \"john\")"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.contains("                    ^"));
    assert!(!err.contains('\u{1b}'), "stderr: {err:?}");
}

#[test]
fn test_malformed_config_exit_code() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("broken.toml");
    fs::write(&config_path, "[parser\n").unwrap();

    let output = scimf(home.path())
        .env("SCIMF_CONFIG", &config_path)
        .args(["filter", "title pr"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("configuration error"));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn test_completions() {
    let output = run(&["completions", "bash"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("scimf"));
}
