//! Basic CLI E2E tests.
//!
//! Tests run the built binary against a temporary config directory.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};

const BEGIN: i64 = 1_653_609_600; // 2022-05-27T00:00:00Z

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_deadline-timer"))
        .env("DEADLINE_TIMER_HOME", home)
        .env_remove("DEADLINE_TIMER_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

fn configure_reference_window(home: &Path) {
    run_cli_success(home, &["config", "set", "begin", "[2022, 5, 27, 0, 0]"]);
    run_cli_success(home, &["config", "set", "end", "[2022, 6, 6, 0, 0]"]);
}

#[test]
fn test_status_unconfigured() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["status"]);
    assert_eq!(stdout.trim(), "Invalid dates");
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_status_at_fixed_times() {
    let home = tempfile::tempdir().unwrap();
    configure_reference_window(home.path());

    let at = |ts: i64| run_cli_success(home.path(), &["status", "--at", &ts.to_string()]);
    assert_eq!(at(BEGIN - 1).trim(), "CHILLOUT");
    assert_eq!(at(BEGIN + 432_000).trim(), "5d 0h (50%)");
    assert_eq!(at(BEGIN + 864_000 - 90).trim(), "1m 30s (99.99%)");
    assert_eq!(at(BEGIN + 864_001).trim(), "DEADLINE!");
}

#[test]
fn test_status_json() {
    let home = tempfile::tempdir().unwrap();
    configure_reference_window(home.path());

    let stdout = run_cli_success(
        home.path(),
        &["status", "--json", "--at", &(BEGIN + 432_000).to_string()],
    );
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["state"]["state"], "in_progress");
    assert_eq!(json["state"]["days_left"], 5);
    assert_eq!(json["state"]["bucket"], "days");
    assert_eq!(json["rendered"]["tier"], "smile");
    assert_eq!(json["rendered"]["icon"], "face-smile-symbolic");
    assert_eq!(json["bar_position"], "right");
}

#[test]
fn test_dates_set_and_show() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "date_zone", "utc"]);
    run_cli_success(home.path(), &["dates", "set-begin", "27-05-2022"]);
    run_cli_success(home.path(), &["dates", "set-end", "06-06-2022"]);

    let shown = run_cli_success(home.path(), &["dates", "show"]);
    assert!(shown.contains("begin: 27-05-2022"), "{shown}");
    assert!(shown.contains("end:   06-06-2022"), "{shown}");
    assert!(shown.contains("(864000s)"), "{shown}");

    let stored = run_cli_success(home.path(), &["config", "get", "end"]);
    assert_eq!(stored.trim(), "2022-06-06");
}

#[test]
fn test_dates_reject_invalid_entry() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["dates", "set-begin", "31-02-2024"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "{stderr}");

    let (_, stderr, code) = run_cli(home.path(), &["dates", "set-end", "2024-02-01"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("DD-MM-YYYY"), "{stderr}");
}

#[test]
fn test_reversed_dates_warn_and_show_invalid() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["dates", "set-begin", "06-06-2022"]);
    let (_, stderr, code) = run_cli(home.path(), &["dates", "set-end", "27-05-2022"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("warning:"), "{stderr}");

    let stdout = run_cli_success(home.path(), &["status"]);
    assert_eq!(stdout.trim(), "Invalid dates");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "labels.deadline", "TIME UP"]);
    let value = run_cli_success(home.path(), &["config", "get", "labels.deadline"]);
    assert_eq!(value.trim(), "TIME UP");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(home.path(), &["config", "set", "bar_position", "top"]);
    assert_eq!(code, 1);

    run_cli_success(home.path(), &["config", "reset"]);
    let value = run_cli_success(home.path(), &["config", "get", "labels.deadline"]);
    assert_eq!(value.trim(), "DEADLINE!");
}

#[test]
fn test_config_list_is_json() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "list"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["refresh_secs"], 1);
    assert_eq!(json["labels"]["before"], "CHILLOUT");
}

#[test]
fn test_watch_stops_after_count() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["watch", "--count", "2"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Invalid dates", "Invalid dates"]);
}

#[test]
fn test_watch_picks_up_config_edits() {
    let home = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_deadline-timer"))
        .env("DEADLINE_TIMER_HOME", home.path())
        .env_remove("DEADLINE_TIMER_LOG")
        .args(["watch", "--json", "--count", "10"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn watch");
    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();

    let first: serde_json::Value =
        serde_json::from_str(&lines.next().unwrap().unwrap()).unwrap();
    assert_eq!(first["rendered"]["text"], "Invalid dates");
    assert_eq!(first["bar_position"], "right");

    run_cli_success(home.path(), &["config", "set", "labels.invalid", "Set dates"]);
    run_cli_success(home.path(), &["config", "set", "bar_position", "left"]);

    let mut seen = Vec::new();
    let mut updated = false;
    for line in lines {
        let frame: serde_json::Value = serde_json::from_str(&line.unwrap()).unwrap();
        if frame["rendered"]["text"] == "Set dates" && frame["bar_position"] == "left" {
            updated = true;
            break;
        }
        seen.push(frame);
    }
    let _ = child.kill();
    let _ = child.wait();
    assert!(updated, "config edits never reached watch: {seen:?}");
}
