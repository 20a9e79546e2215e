//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command with optional stdin and return (stdout, stderr, code).
fn run_cli(home: &TempDir, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dailythree"))
        .args(args)
        .env("DAILYTHREE_HOME", home.path())
        .env_remove("DAILYTHREE_ENV")
        .env_remove("DAILYTHREE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a shell script and return one parsed JSON value per output line.
fn run_shell(home: &TempDir, script: &str) -> Vec<serde_json::Value> {
    let (stdout, stderr, code) = run_cli(home, &["shell", "--tick-ms", "3600000"], script);
    assert_eq!(code, 0, "shell failed: {stderr}");
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("Failed to parse JSON output"))
        .collect()
}

fn types(outputs: &[serde_json::Value]) -> Vec<&str> {
    outputs
        .iter()
        .map(|v| v["type"].as_str().unwrap_or("view"))
        .collect()
}

#[test]
fn test_free_account_hits_upgrade_prompt() {
    let home = TempDir::new().unwrap();
    let out = run_shell(&home, "add\nadd\nadd\nadd\nshow\n");

    assert_eq!(
        types(&out),
        vec!["task_added", "task_added", "task_added", "upgrade_required", "view"]
    );
    let view = &out[4];
    assert_eq!(view["tasks"].as_array().unwrap().len(), 3);
    assert_eq!(view["flags"]["show_upgrade_prompt"], true);
}

#[test]
fn test_pro_account_from_config_allows_four() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["config", "set", "account.is_pro", "true"], "");
    assert_eq!(code, 0, "config set failed: {stderr}");

    let out = run_shell(&home, "add\nadd\nadd\nadd\nadd\n");
    assert_eq!(
        types(&out),
        vec!["task_added", "task_added", "task_added", "task_added", "refused"]
    );
}

#[test]
fn test_focus_session_locks_and_credits() {
    let home = TempDir::new().unwrap();
    let script = "add\nadd\nedit 1 Write the proposal\nfocus 1\nedit 2 too late\ndelete 2\n\
                  tick 1200\nstop\nscore\n";
    let out = run_shell(&home, script);

    assert_eq!(
        types(&out),
        vec![
            "task_added",
            "task_added",
            "task_updated",
            "session_started",
            "refused",
            "refused",
            "session_ticked",
            "session_stopped",
            "score",
        ]
    );
    assert_eq!(out[6]["remaining_secs"], 300);
    assert_eq!(out[7]["credited_minutes"], 20);
    // focused (20) + committed (20)
    assert_eq!(out[8]["score"], 40);
}

#[test]
fn test_full_day_scores_hundred() {
    let home = TempDir::new().unwrap();
    let script = "add\nfocus 1\ntick 600\nstop\ntoggle 1\nreflect shipped it\nscore\n";
    let out = run_shell(&home, script);
    assert_eq!(out.last().unwrap()["score"], 100);
}

#[test]
fn test_blank_morning_answer_refused() {
    let home = TempDir::new().unwrap();
    let out = run_shell(&home, "morning\nmorning ship v1\nshow\n");
    assert_eq!(types(&out), vec!["refused", "morning_answered", "view"]);
    assert_eq!(out[2]["morning_question"], "ship v1");
    assert_eq!(out[2]["flags"]["show_morning_prompt"], false);
}

#[test]
fn test_reset_clears_day() {
    let home = TempDir::new().unwrap();
    let out = run_shell(&home, "add\nfocus 1\nreset\nshow\n");
    let view = out.last().unwrap();
    assert_eq!(out[2]["type"], "day_reset");
    assert!(view["tasks"].as_array().unwrap().is_empty());
    assert_eq!(view["focus"]["active"], false);
}

#[test]
fn test_shell_text_keeps_its_spacing() {
    let home = TempDir::new().unwrap();
    let script = "add\nedit 1 a    b\tc\nmorning   one  big\tthing\nshow\n";
    let out = run_shell(&home, script);

    assert_eq!(
        types(&out),
        vec!["task_added", "task_updated", "morning_answered", "view"]
    );
    let view = &out[3];
    assert_eq!(view["tasks"][0]["text"], "a    b\tc");
    assert_eq!(view["morning_question"], "one  big\tthing");
}

#[test]
fn test_unknown_shell_command_reports_error() {
    let home = TempDir::new().unwrap();
    let out = run_shell(&home, "juggle\nquit\nadd\n");
    assert_eq!(types(&out), vec!["error"]);
}

#[test]
fn test_config_get_and_list() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["config", "get", "focus.tick_interval_ms"], "");
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "1000");

    let (stdout, _, code) = run_cli(&home, &["config", "list"], "");
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["account"]["is_pro"], false);
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["config", "set", "account.tier", "gold"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_feedback_print_builds_mailto() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["feedback", "--print", "more", "themes"], "");
    assert_eq!(code, 0, "Feedback failed");
    assert!(stdout.starts_with("mailto:feedback@dailythree.app?subject="));
    assert!(stdout.trim().ends_with("body=more%20themes"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&home, &["completions", "bash"], "");
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("dailythree"));
}

#[test]
fn test_read_only_commands_leave_no_config_behind() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&home, &["completions", "zsh"], "");
    assert_eq!(code, 0, "Completions failed");
    let (_, _, code) = run_cli(&home, &["feedback", "--print", "hello"], "");
    assert_eq!(code, 0, "Feedback failed");

    assert!(!home.path().join("dailythree").exists());
}
