use assert_cmd::Command;
use predicates::prelude::*;

fn hostsnap() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hostsnap"));
    cmd.env_remove("HOSTSNAP_CONFIG");
    cmd
}

#[test]
fn test_help_command() {
    hostsnap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inventory installed packages"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_version_flag() {
    let expected = format!("hostsnap {}", env!("CARGO_PKG_VERSION"));

    hostsnap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[test]
fn test_unknown_command_fails() {
    hostsnap()
        .arg("unknown-command-xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: hostsnap"));
}

#[test]
fn test_missing_config_file_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();

    hostsnap()
        .args(["report", "--config"])
        .arg(temp_dir.path().join("absent.kdl"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_invalid_setting_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = temp_dir.path().join("hostsnap.kdl");
    std::fs::write(&config, "resolve-mode \"best\"\n").unwrap();

    hostsnap()
        .args(["report", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_completions_bash() {
    hostsnap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hostsnap"));
}
