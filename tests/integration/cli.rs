//! Integration tests for the `workspace` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::project_dir;

fn workspace_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("workspace").expect("binary should build");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

#[test]
fn test_tree_prints_files_and_skips_ignored() {
    let data = TempDir::new().unwrap();
    let project = project_dir();
    let root = project.path().display().to_string();

    workspace_cmd(&data)
        .arg("tree")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}/src/nested/deep.rs", root)))
        .stdout(predicate::str::contains("node_modules").not());

    // First run writes the default config and the log file
    assert!(data.path().join("config.toml").exists());
    assert!(data.path().join("logs/workspace.log").exists());
}

#[test]
fn test_mention_json_output() {
    let data = TempDir::new().unwrap();
    let project = project_dir();
    let root = project.path().display().to_string();

    let output = workspace_cmd(&data)
        .args(["mention", "lib.rs", "--json", "--project"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(output.status.success());

    // The temp root is part of every path, so match on names only
    let files: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let named: Vec<&serde_json::Value> = files
        .as_array()
        .unwrap()
        .iter()
        .filter(|f| f["name"] == "lib.rs")
        .collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0]["type"], "file");
    assert_eq!(named[0]["path"], format!("{}/src/lib.rs", root));
}

#[test]
fn test_open_prints_tab_strip() {
    let data = TempDir::new().unwrap();
    let project = project_dir();
    let lib = project.path().join("src/lib.rs").display().to_string();
    let missing = project.path().join("missing.rs").display().to_string();

    workspace_cmd(&data)
        .args(["open", &lib, &missing])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib.rs\t16 bytes"))
        .stdout(predicate::str::contains("* missing.rs …\tpending"))
        .stderr(predicate::str::contains("Failed to read file"));
}
