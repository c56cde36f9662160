//! Integration tests for the tessera CLI.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn tessera(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tessera"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn png_dimensions(path: &Path) -> (u32, u32) {
    image::open(path).expect("readable png").to_rgba8().dimensions()
}

#[test]
fn patterns_command_lists_all_kinds() {
    let output = tessera(&["patterns"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    for name in ["user", "octagram1", "wang", "hilbert", "spider-web"] {
        assert!(stdout.contains(name), "Should list '{}'", name);
    }
    // Header, 24 kinds, blank line, footnote
    assert_eq!(stdout.lines().count(), 27);
}

#[test]
fn render_writes_a_tiled_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tiles.png");
    let output = tessera(&[
        "render", "-p", "octagram1", "-s", "100", "--width", "250", "--height", "130",
        "-o", out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_dimensions(&out), (250, 130));
}

#[test]
fn render_tile_only_uses_the_tile_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tile.png");
    let output = tessera(&["render", "-p", "truchet", "-s", "64", "--tile-only", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(png_dimensions(&out), (64, 64));
}

#[test]
fn render_reads_config_and_flags_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("tiling.yaml");
    fs::write(&config, "tile:\n  kind: lattice\n  size: 80\nviewport:\n  width: 160\n  height: 160\n").unwrap();
    let out = dir.path().join("lattice.png");

    let output = tessera(&["render", "-c", config.to_str().unwrap(), "--height", "90", "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_dimensions(&out), (160, 90));
    assert!(String::from_utf8_lossy(&output.stdout).contains("lattice"));
}

#[test]
fn render_rejects_unknown_kind() {
    let output = tessera(&["render", "-p", "no-such-kind", "-o", "never.png"]);
    assert!(!output.status.success());
    assert!(!Path::new("never.png").exists());
}

#[test]
fn render_reports_missing_config() {
    let output = tessera(&["render", "-c", "/nonexistent/tiling.yaml", "-o", "never.png"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read config file"));
}

#[test]
fn sketch_replays_and_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("sketch.yaml");
    fs::write(
        &script,
        r##"
tile_size: 150
output: { width: 300, height: 300 }
steps:
  - { op: begin, at: [20, 20] }
  - { op: commit, at: [130, 20] }
  - { op: begin, stroke: arc, at: [20, 130] }
  - { op: commit, at: [130, 130] }
  - { op: complete-arc, through: [75, 100] }
  - { op: begin, at: [40, 40] }
  - { op: commit, at: [120, 40] }
  - { op: undo }
  - { op: fill, at: [75, 75], color: "#dc1e1e" }
"##,
    )
    .unwrap();
    let out = dir.path().join("sketch.png");

    let output = tessera(&["sketch", script.to_str().unwrap(), "-o", out.to_str().unwrap(), "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(png_dimensions(&out), (300, 300));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json summary");
    let actions = summary["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0]["type"], "line");
    assert_eq!(actions[1]["type"], "arc");
    assert_eq!(actions[2]["type"], "fill");
    assert_eq!(summary["tally"]["undos"], 1);
}

#[test]
fn sketch_rejects_bad_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("bad.yaml");
    fs::write(&script, "steps:\n  - { op: scribble }\n").unwrap();
    let output = tessera(&["sketch", script.to_str().unwrap(), "-o", "never.png"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse sketch YAML"));
}

#[test]
fn gallery_writes_a_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("gallery.png");
    let output = tessera(&["gallery", "-s", "40", "--columns", "8", "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    // 23 procedural kinds: 8 columns, 3 rows
    assert_eq!(png_dimensions(&out), (2 * 16 + 8 * 40 + 7 * 8, 2 * 16 + 3 * 40 + 2 * 8));
}

#[test]
fn bench_prints_a_summary() {
    let output = tessera(&["bench", "-p", "checkered", "-s", "32", "-n", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TILE BENCHMARK"));
    assert!(stdout.contains("checkered"));
}
