//! CLI integration tests for the `bhasha` binary.
//!
//! Each test spawns the compiled binary with `BHASHA_CONFIG` pointing at a
//! config file inside a fresh temp dir, so the credential store never
//! touches `~/.bhasha`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Temp dir holding `config.json` plus a `credentials/` directory.
fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let creds = dir.path().join("credentials");
    let config = serde_json::json!({
        "endpoints": { "timeoutSecs": 5 },
        "storage": { "credentialDir": creds.to_str().unwrap() }
    });
    std::fs::write(dir.path().join("config.json"), config.to_string()).unwrap();
    dir
}

/// Build a `Command` for the compiled `bhasha` binary bound to `home`.
fn bhasha_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bhasha"));
    cmd.env("BHASHA_CONFIG", home.join("config.json"));
    // Suppress tracing output so assertions only match program output.
    cmd.env("RUST_LOG", "off");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    bhasha_bin(home).args(args).output().expect("failed to run bhasha")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ── 1. Version and help ─────────────────────────────────────────────────

#[test]
fn version_output() {
    let home = sandbox();
    let output = run(home.path(), &["--version"]);

    assert!(output.status.success(), "exit code should be 0");
    let out = stdout(&output);
    assert!(
        out.contains("bhasha") && out.contains("0.3.2"),
        "version output should contain 'bhasha' and '0.3.2', got: {out}"
    );
}

#[test]
fn help_lists_subcommands() {
    let home = sandbox();
    let output = run(home.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    for sub in ["translate", "transliterate", "asr", "tts", "s2s", "questions", "token"] {
        assert!(out.contains(sub), "help should list '{sub}', got: {out}");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let home = sandbox();
    let output = run(home.path(), &["summarize"]);
    assert!(!output.status.success());
}

// ── 2. Offline commands ─────────────────────────────────────────────────

#[test]
fn languages_table() {
    let home = sandbox();
    let output = run(home.path(), &["languages"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Hindi"), "got: {out}");
    assert!(out.contains("தமிழ்"), "got: {out}");
}

#[test]
fn config_show_reflects_file() {
    let home = sandbox();
    let output = run(home.path(), &["config", "show"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["endpoints"]["timeout_secs"], 5);
}

#[test]
fn explicit_missing_config_fails() {
    let home = sandbox();
    let output = run(
        home.path(),
        &["--config", "/tmp/.bhasha-test-nonexistent.json", "languages"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("config file not found"));
}

// ── 3. Token lifecycle ──────────────────────────────────────────────────

#[test]
fn token_round_trip() {
    let home = sandbox();

    let status = run(home.path(), &["token", "status"]);
    assert!(stdout(&status).contains("not set"));

    let set = run(home.path(), &["token", "set", "abcd-efgh-1234"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    // A new process sees the persisted token.
    let status = run(home.path(), &["token", "status"]);
    assert!(stdout(&status).contains("Token: set"));

    let show = run(home.path(), &["token", "show"]);
    let shown = stdout(&show);
    assert!(shown.contains("1234"));
    assert!(!shown.contains("abcd"));

    let reveal = run(home.path(), &["token", "show", "--reveal"]);
    assert!(stdout(&reveal).contains("abcd-efgh-1234"));

    let clear = run(home.path(), &["token", "clear"]);
    assert!(clear.status.success());
    let status = run(home.path(), &["token", "status"]);
    assert!(stdout(&status).contains("not set"));
}

#[test]
fn blank_token_is_rejected() {
    let home = sandbox();
    let output = run(home.path(), &["token", "set", "   "]);
    assert!(!output.status.success());
}

// ── 4. Guards before any network call ───────────────────────────────────

#[test]
fn translate_without_token_fails() {
    let home = sandbox();
    let output = run(home.path(), &["translate", "Hello", "--from", "en", "--to", "hi"]);

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(
        err.contains("Please set your Authorization Token first"),
        "got: {err}"
    );
}

#[test]
fn feedback_with_bad_rating_fails() {
    let home = sandbox();
    let output = run(home.path(), &["feedback", "meh", "--rating", "0"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please provide a rating"));
}

#[test]
fn asr_with_missing_file_fails() {
    let home = sandbox();
    let missing = home.path().join("nope.wav");
    let output = run(home.path(), &["asr", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read audio file"));
}
