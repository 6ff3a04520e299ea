use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCENE: &str = r#"{
  "version": 1,
  "last_modified": "2025-01-01T00:00:00Z",
  "shapes": [
    {"kind": "rect", "anchor": {"x": 10.0, "y": 10.0}, "extent": {"w": 100.0, "h": 50.0},
     "color": {"r": 1.0, "g": 0.0, "b": 0.0}, "stroke_width": 2.0, "filled": true},
    {"kind": "freehand", "points": [{"x": 0.0, "y": 0.0}, {"x": 20.0, "y": 5.0}],
     "color": {"r": 0.0, "g": 0.0, "b": 0.0, "a": 1.0}, "stroke_width": 3.0, "filled": false},
    {"kind": "freehand", "points": [{"x": 40.0, "y": 40.0}, {"x": 60.0, "y": 45.0}],
     "color": {"r": 0.0, "g": 0.0, "b": 1.0}, "stroke_width": 1.0, "filled": false}
  ]
}"#;

fn vecsketch_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vecsketch").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_scene(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("scene.json");
    std::fs::write(&path, SCENE).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    vecsketch_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export").and(predicate::str::contains("inspect")));
}

#[test]
fn export_writes_png() {
    let temp = TempDir::new().unwrap();
    let scene = write_scene(&temp);
    let output = temp.path().join("out").join("scene.png");

    vecsketch_cmd(temp.path())
        .arg("export")
        .arg(&scene)
        .arg(&output)
        .args(["--width", "64", "--height", "48"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 shapes"));

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn export_uses_configured_default_size() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("vecsketch");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[export]\nwidth = 120\nheight = 90\n",
    )
    .unwrap();
    let scene = write_scene(&temp);
    let output = temp.path().join("sized.png");

    vecsketch_cmd(temp.path())
        .arg("export")
        .arg(&scene)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("(120x90)"));
}

#[test]
fn export_rejects_invalid_size() {
    let temp = TempDir::new().unwrap();
    let scene = write_scene(&temp);
    let output = temp.path().join("bad.png");

    vecsketch_cmd(temp.path())
        .arg("export")
        .arg(&scene)
        .arg(&output)
        .args(["--width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid export size"));
    assert!(!output.exists());
}

#[test]
fn export_missing_scene_fails() {
    let temp = TempDir::new().unwrap();
    vecsketch_cmd(temp.path())
        .arg("export")
        .arg(temp.path().join("nope.json"))
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn inspect_prints_kind_tally() {
    let temp = TempDir::new().unwrap();
    let scene = write_scene(&temp);

    vecsketch_cmd(temp.path())
        .arg("inspect")
        .arg(&scene)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Shapes: 3")
                .and(predicate::str::contains("freehand: 2"))
                .and(predicate::str::contains("rect: 1"))
                .and(predicate::str::contains("Compressed: no")),
        );
}

#[test]
fn inspect_rejects_unknown_version() {
    let temp = TempDir::new().unwrap();
    let scene = temp.path().join("future.json");
    std::fs::write(
        &scene,
        r#"{"version": 99, "last_modified": "2025-01-01T00:00:00Z", "shapes": []}"#,
    )
    .unwrap();

    vecsketch_cmd(temp.path())
        .arg("inspect")
        .arg(&scene)
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"));
}

#[test]
fn dump_config_schema_prints_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"drawing\"")
                .and(predicate::str::contains("\"session\""))
                .and(predicate::str::contains("\"export\"")),
        );
}
