//! Integration tests for the WeatherDash CLI

use std::io::Write;
use std::process::{Command, Stdio};

fn weatherdash() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_weatherdash"));
    // Keep the host environment from leaking configuration into the tests
    command
        .env_remove("WEATHERDASH_WEATHER__API_KEY")
        .env("XDG_CONFIG_HOME", std::env::temp_dir().join("weatherdash-cli-tests"));
    command
}

/// Test that the CLI shows help with the subcommands
#[test]
fn test_cli_help() {
    let output = weatherdash().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weatherdash"));
    assert!(stdout.contains("search"));
    assert!(stdout.contains("locate"));
    assert!(stdout.contains("theme"));
}

/// Searching without an API key fails with a configuration error
#[test]
fn test_search_without_api_key() {
    let output = weatherdash()
        .args(["search", "Madrid"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("API key is missing"), "got: {stderr}");
}

/// Unknown measurement systems are rejected by argument parsing
#[test]
fn test_invalid_units() {
    let output = weatherdash()
        .args(["--units", "kelvin", "search", "Madrid"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("kelvin"));
}

/// The shell keeps running when the preference store cannot be used
#[test]
fn test_shell_without_preference_store() {
    // A regular file where the preference database directory should be
    let blocker = tempfile::NamedTempFile::new().expect("temp file");

    let mut child = weatherdash()
        .arg("shell")
        .env("WEATHERDASH_WEATHER__API_KEY", "cli_test_key_123")
        .env("WEATHERDASH_PREFERENCES__LOCATION", blocker.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"show\ntheme\nquit\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("wait for shell");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Search for a city"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Theme preference unavailable"), "got: {stderr}");
}
