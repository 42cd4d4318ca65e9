//! Runs the `tamis` binary against temporary projects.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tamis(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tamis"));
    cmd.current_dir(dir.path());
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("dist")).unwrap();
    fs::write(
        dir.path().join("src/index.html"),
        r#"<main class="flex p-4"></main>"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_missing_stylesheet_exits_with_path() {
    let dir = project();

    tamis(&dir)
        .arg("optimize")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: Failed to read"))
        .stderr(predicate::str::contains("index.css"));

    assert!(!dir.path().join("dist/bundle-analytics.json").exists());
}

#[test]
fn test_default_command_optimizes() {
    let dir = project();
    fs::write(
        dir.path().join("dist/index.css"),
        ".flex{display:flex}\n.grid{display:grid}",
    )
    .unwrap();

    tamis(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 used utilities"));

    assert_eq!(
        fs::read_to_string(dir.path().join("dist/index.optimized.css")).unwrap(),
        ".flex{display:flex}"
    );
}

#[test]
fn test_flags_select_outputs() {
    let dir = project();
    fs::write(dir.path().join("framework.css"), ".p-4{padding:1rem}").unwrap();

    tamis(&dir)
        .args(["optimize", "-s", "framework.css", "-o", "build", "--no-chunks"])
        .assert()
        .success();

    assert!(dir.path().join("build/index.optimized.css").is_file());
    assert!(dir.path().join("build/critical.css").is_file());
    assert!(!dir.path().join("build/chunks").exists());
}
