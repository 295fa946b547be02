//! CLI tests against the built binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{demos_dir, temp_script};

fn typewrite(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("typewrite").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_arguments_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    typewrite(&home).assert().code(2);
}

#[test]
fn check_prints_a_summary() {
    let home = TempDir::new().unwrap();
    typewrite(&home)
        .arg("check")
        .arg(demos_dir().join("nate.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("fragments:  5"))
        .stdout(predicate::str::contains("cycle:      4750ms"));
}

#[test]
fn check_json_is_machine_readable() {
    let home = TempDir::new().unwrap();
    let output = typewrite(&home)
        .arg("check")
        .arg("--json")
        .arg(demos_dir().join("loop.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["fragments"], 2);
    assert_eq!(summary["characters"], 10);
    assert_eq!(summary["typing_speed_ms"], 120);
    assert_eq!(summary["options"]["continuous"], true);
    assert_eq!(summary["options"]["new_line"], false);
}

#[test]
fn check_trace_lists_surface_operations() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_script("[timing]\ntyping_speed_ms = 10\n\n[[fragment]]\ntext = \"hi\"\n");
    typewrite(&home)
        .args(["check", "--trace"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[    0ms] type 'h' on line 0"))
        .stdout(predicate::str::contains("[   10ms] type 'i' on line 0"));
}

#[test]
fn invalid_script_exits_with_one() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_script("[[fragment]]\ntext = \"a\"\ncolor = \"plaid\"\n");
    typewrite(&home)
        .arg("check")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid script"));
}

#[test]
fn empty_script_cannot_be_traced() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = temp_script("");
    typewrite(&home)
        .args(["check", "--trace"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Nothing to play"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    typewrite(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("typewrite"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_show_reads_xdg_config_home() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("typewrite");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[timing]\ntyping_speed_ms = 80\n").unwrap();

    typewrite(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("typing_speed_ms = 80"))
        .stdout(predicate::str::contains("blink_period_ms = 1000"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_path_points_into_xdg_config_home() {
    let home = TempDir::new().unwrap();
    typewrite(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("typewrite/config.toml"))
        .stdout(predicate::str::contains("(not created)"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_timing_reaches_check() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("typewrite");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[timing]\ntyping_speed_ms = 100\n").unwrap();
    let (_dir, path) = temp_script("[[fragment]]\ntext = \"abcd\"\n");

    typewrite(&home)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle:      500ms"));
}
