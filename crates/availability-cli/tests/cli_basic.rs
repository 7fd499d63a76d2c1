//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a temporary config file.

use std::path::Path;
use std::process::Command;

/// Run a CLI command with `--config <path>` and return (code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "availability-cli", "--"])
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn temp_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_generate_json() {
    let (_dir, config) = temp_config();
    let (code, stdout, _) = run_cli(&config, &["generate", "--start", "2026-10-19", "--seed", "1"]);
    assert_eq!(code, 0, "generate failed");

    let days: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert_eq!(days[0]["short_name"], "Mon");
    assert_eq!(days[0]["slots"].as_array().unwrap().len(), 16);
}

#[test]
fn test_generate_rejects_bad_date() {
    let (_dir, config) = temp_config();
    let (code, _, stderr) = run_cli(&config, &["generate", "--start", "next monday"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("invalid date"));
}

#[test]
fn test_render_writes_page() {
    let (dir, config) = temp_config();
    let out = dir.path().join("table.html");
    let (code, _, _) = run_cli(
        &config,
        &["render", "--start", "2026-10-19", "--seed", "1", "--out", out.to_str().unwrap()],
    );
    assert_eq!(code, 0, "render failed");

    let page = std::fs::read_to_string(out).unwrap();
    assert!(page.contains("<table id=\"table\">"));
    assert!(page.contains("--color5: #2C3E50;"));
}

#[test]
fn test_styles() {
    let (_dir, config) = temp_config();
    let (code, stdout, _) = run_cli(&config, &["styles"]);
    assert_eq!(code, 0, "styles failed");
    assert!(stdout.contains(".available-0 { background-color: var(--color0); color: #FFFFFF; }"));
}

#[test]
fn test_anchor() {
    let (_dir, config) = temp_config();
    let (code, stdout, _) = run_cli(&config, &["anchor", "--now", "2026-10-19 14:00"]);
    assert_eq!(code, 0, "anchor failed");
    assert!(stdout.starts_with("2026-10-26"));
}

#[test]
fn test_config_set_get() {
    let (_dir, config) = temp_config();
    let (code, _, _) = run_cli(&config, &["config", "set", "schedule.step", "0:15"]);
    assert_eq!(code, 0, "config set failed");
    let (code, stdout, _) = run_cli(&config, &["config", "get", "schedule.step"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "0:15");
}

#[test]
fn test_config_set_rejects_invalid_geometry() {
    let (_dir, config) = temp_config();
    let (code, _, stderr) = run_cli(&config, &["config", "set", "schedule.step", "0:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("step"));
    assert!(!config.exists());
}

#[test]
fn test_event_add_requires_replace() {
    let (_dir, config) = temp_config();
    let add = [
        "event", "add", "--day", "tue", "--begin", "10:00", "--end", "11:00", "--level", "4",
        "--label", "Review",
    ];
    assert_eq!(run_cli(&config, &add).0, 0);
    assert_ne!(run_cli(&config, &add).0, 0);

    let mut replace = add.to_vec();
    replace.push("--replace");
    assert_eq!(run_cli(&config, &replace).0, 0);

    let (code, stdout, _) = run_cli(&config, &["event", "list", "--json"]);
    assert_eq!(code, 0);
    let events: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(events.as_array().unwrap().len(), 1);

    assert_eq!(run_cli(&config, &["event", "remove", "--day", "2", "--begin", "10:00"]).0, 0);
    let (_, stdout, _) = run_cli(&config, &["event", "list"]);
    assert!(stdout.contains("no custom events"));
}
