//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each
//! test gets its own home directory so data dirs, config, and the
//! session never leak between tests.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against an isolated home and return output.
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "habithub-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env("HABITHUB_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn run_cli_failure(home: &Path, args: &[&str]) -> String {
    let (_, stderr, code) = run_cli(home, args);
    assert_ne!(code, 0, "CLI command unexpectedly succeeded: {args:?}");
    stderr
}

#[test]
fn test_register_login_whoami_logout() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "hunter2"],
    );
    let user: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["hp"], 5);

    let out = run_cli_success(home.path(), &["account", "whoami"]);
    assert_eq!(out.trim(), "ada@example.com");

    run_cli_success(home.path(), &["account", "logout"]);
    run_cli_failure(home.path(), &["account", "whoami"]);

    let out = run_cli_success(
        home.path(),
        &["account", "login", "ada@example.com", "hunter2"],
    );
    let user: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(user["email"], "ada@example.com");
}

#[test]
fn test_wrong_password_is_rejected() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "hunter2"],
    );
    let stderr = run_cli_failure(
        home.path(),
        &["account", "login", "ada@example.com", "nope"],
    );
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
}

#[test]
fn test_commands_require_login() {
    let home = TempDir::new().unwrap();
    let stderr = run_cli_failure(home.path(), &["habit", "list"]);
    assert!(stderr.contains("not logged in"), "stderr was: {stderr}");
}

#[test]
fn test_habit_add_list_done() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "pw"],
    );

    let out = run_cli_success(
        home.path(),
        &[
            "habit", "add", "Run", "--category", "fitness", "--period", "daily",
        ],
    );
    let active: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(active[0]["id"], 1);
    assert_eq!(active[0]["title"], "Run");
    assert_eq!(active[0]["period"], "daily");

    let out = run_cli_success(home.path(), &["habit", "list"]);
    let habits: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(habits["active"].as_array().unwrap().len(), 1);

    let out = run_cli_success(home.path(), &["habit", "done", "1"]);
    let habit: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(habit["status"], "completed");
}

#[test]
fn test_habit_stop_moves_to_history() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "pw"],
    );
    run_cli_success(home.path(), &["habit", "add", "Read"]);
    run_cli_success(home.path(), &["habit", "stop", "1"]);

    let out = run_cli_success(home.path(), &["habit", "list"]);
    let habits: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(habits["active"].as_array().unwrap().is_empty());
    assert_eq!(habits["completed"].as_array().unwrap().len(), 1);
}

#[test]
fn test_habit_import() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "pw"],
    );

    let doc = r#"{
        "habits": [
            {"id": 3, "title": "Meditate", "period": "weekly"},
            {"title": "Hydrate"}
        ],
        "actions": []
    }"#;
    let path = home.path().join("export.json");
    std::fs::write(&path, doc).unwrap();

    let out = run_cli_success(
        home.path(),
        &["habit", "import", path.to_str().unwrap()],
    );
    let active: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(active.as_array().unwrap().len(), 2);
    assert_eq!(active[0]["id"], 3);
    assert_eq!(active[1]["id"], 4);
}

#[test]
fn test_check_prints_profile_and_nag() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "pw"],
    );
    run_cli_success(home.path(), &["habit", "add", "Stretch"]);

    let (stdout, stderr, code) = run_cli(home.path(), &["check"]);
    assert_eq!(code, 0, "check failed: {stderr}");
    assert!(stdout.contains("\"hp\""), "stdout was: {stdout}");
    assert!(
        stderr.contains("still waiting on: Stretch"),
        "stderr was: {stderr}"
    );

    // Once completed the nag line disappears.
    run_cli_success(home.path(), &["habit", "done", "1"]);
    let (_, stderr, code) = run_cli(home.path(), &["check"]);
    assert_eq!(code, 0);
    assert!(!stderr.contains("still waiting on"), "stderr was: {stderr}");
}

#[test]
fn test_profile_summary() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &[
            "account",
            "register",
            "ada@example.com",
            "pw",
            "--username",
            "Ada",
        ],
    );
    let out = run_cli_success(home.path(), &["profile"]);
    let summary: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(summary["name"], "Ada");
    assert_eq!(summary["hp"], 5);
    assert_eq!(summary["level"], 1);
    assert_eq!(summary["active_habits"], 0);
}

#[test]
fn test_friend_flow() {
    let home = TempDir::new().unwrap();
    run_cli_success(
        home.path(),
        &["account", "register", "ada@example.com", "pw"],
    );
    run_cli_success(home.path(), &["account", "logout"]);
    run_cli_success(
        home.path(),
        &["account", "register", "grace@example.com", "pw"],
    );

    let out = run_cli_success(home.path(), &["friend", "add", "ada@example.com"]);
    let friends: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(friends[0]["email"], "ada@example.com");
    assert_eq!(friends[0]["name"], "ada");

    let stderr = run_cli_failure(home.path(), &["friend", "add", "ghost@example.com"]);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");

    let out = run_cli_success(home.path(), &["friend", "remove", "ada@example.com"]);
    let friends: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(friends.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_set_list() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["config", "get", "timing.compressed"]);
    assert_eq!(out.trim(), "false");

    run_cli_success(
        home.path(),
        &["config", "set", "timing.compressed", "true"],
    );
    let out = run_cli_success(home.path(), &["config", "get", "timing.compressed"]);
    assert_eq!(out.trim(), "true");

    let out = run_cli_success(home.path(), &["config", "list"]);
    let config: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(config["timing"]["compressed"], true);
    assert_eq!(config["tick"]["interval_secs"], 6);

    run_cli_failure(home.path(), &["config", "get", "timing.bogus"]);
}
