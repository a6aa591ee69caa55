//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusdeck"))
        .args(args)
        .env("FOCUSDECK_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_tracks_list_shows_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["tracks", "list"]);
    assert_eq!(code, 0, "tracks list failed");
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.contains("hz432"));
}

#[test]
fn test_tracks_add_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["tracks", "add", "Focus Mix", "https://youtu.be/dQw4w9WgXcQ"],
    );
    assert_eq!(code, 0, "tracks add failed");
    assert!(stdout.contains("added #8"));

    let (code, stdout, _) = run_cli(
        dir.path(),
        &["tracks", "add", "Again", "https://www.youtube.com/watch?v=dQw4w9WgXcQ"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("already saved as #8"));

    let (code, stdout, _) = run_cli(dir.path(), &["tracks", "list", "--json"]);
    assert_eq!(code, 0);
    let tracks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let tracks = tracks.as_array().unwrap();
    assert_eq!(tracks.len(), 9);
    assert_eq!(tracks[8]["type"], "remote");
    assert_eq!(tracks[8]["title"], "Focus Mix");
}

#[test]
fn test_tracks_add_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["tracks", "add", " ", "https://youtu.be/dQw4w9WgXcQ"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("TITLE_REQUIRED"));

    let (code, _, stderr) = run_cli(dir.path(), &["tracks", "add", "Song", "garbage"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("INVALID_URL"));
}

#[test]
fn test_tracks_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["tracks", "resolve", "https://youtube.com/watch?v=dQw4w9WgXcQ&t=5"],
    );
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "dQw4w9WgXcQ");

    let (code, _, _) = run_cli(dir.path(), &["tracks", "resolve", "not a url"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.pomodoro_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "reminders.interval_secs", "300"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "reminders.interval_secs"]);
    assert_eq!(stdout.trim(), "300");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.nope", "1"]);
    assert_ne!(code, 0);

    let (code, _, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "reminders.interval_secs"]);
    assert_eq!(stdout.trim(), "600");
}

#[test]
fn test_timer_simulate_stopwatch_reminders() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        dir.path(),
        &[
            "timer", "simulate", "--mode", "stopwatch", "--reminders", "--ticks", "1200",
        ],
    );
    assert_eq!(code, 0, "simulate failed: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["elapsed_secs"], 1200);
    assert_eq!(
        report["alerts"],
        serde_json::json!(["first_interval", "subsequent_interval"])
    );
    assert_eq!(report["events"][0]["type"], "timer_started");
}

#[test]
fn test_timer_simulate_countdown_completes() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        dir.path(),
        &["timer", "simulate", "--minutes", "1", "--ticks", "90"],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let events = report["events"].as_array().unwrap();
    assert_eq!(events.last().unwrap()["type"], "countdown_completed");
    assert_eq!(report["state"]["countdown_remaining_secs"], 0);
}

#[test]
fn test_tracks_volume_persists_mute() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["tracks", "volume"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "volume_up  70%");

    let (code, stdout, _) = run_cli(dir.path(), &["tracks", "volume", "0.3", "--toggle-mute"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "volume_off  30%  muted");

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "player.muted"]);
    assert_eq!(stdout.trim(), "true");

    let (_, stdout, _) = run_cli(dir.path(), &["tracks", "volume", "--toggle-mute"]);
    assert_eq!(stdout.trim(), "volume_down  30%");
}
