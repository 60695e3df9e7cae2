//! CLI surface tests: argument parsing, `tasks`, and `completions`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn groundwork() -> Command {
    Command::cargo_bin("groundwork").unwrap()
}

#[test]
fn no_args_shows_help() {
    groundwork()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
    groundwork()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("groundwork"));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    groundwork()
        .args(["generate", "shop", "--bogus"])
        .assert()
        .code(2);
}

#[test]
fn quiet_and_verbose_conflict() {
    groundwork()
        .args(["generate", "shop", "-q", "-v"])
        .assert()
        .code(2);
}

#[test]
fn generate_alias_is_registered() {
    groundwork()
        .args(["g", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn invalid_endpoint_type_is_rejected() {
    groundwork()
        .args(["generate", "shop", "--endpoint-type", "global"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("endpoint-type"));
}

#[test]
fn tasks_prints_the_five_definitions() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("workspace.json"),
        r#"{"version":1,"projects":{"shop":{"root":"apps/shop","tasks":{}}}}"#,
    )
    .unwrap();

    let assert = groundwork()
        .current_dir(dir.path())
        .args(["tasks", "shop"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    for kind in [
        "groundwork:compile",
        "groundwork:prerender",
        "groundwork:offline",
        "groundwork:deploy",
        "groundwork:destroy",
    ] {
        assert!(stdout.contains(kind), "missing {kind} in:\n{stdout}");
    }
    assert!(stdout.contains("dist/apps/shop"));
}

#[test]
fn tasks_unknown_project_exits_not_found() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("workspace.json"),
        r#"{"version":1,"projects":{}}"#,
    )
    .unwrap();

    groundwork()
        .current_dir(dir.path())
        .args(["tasks", "shop"])
        .assert()
        .code(3);
}

#[test]
fn completions_bash_emits_a_script() {
    groundwork()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("groundwork"));
}

#[test]
fn completions_zsh_emits_a_script() {
    groundwork()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}
