//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with an isolated config dir and no credentials in the environment
fn mock_interviewer_bin(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mock-interviewer").expect("binary is built");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("MOCK_INTERVIEWER_PROVIDER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("interviewer"))
        .stdout(predicate::str::contains("--role"))
        .stdout(predicate::str::contains("--company"))
        .stdout(predicate::str::contains("--questions"))
        .stdout(predicate::str::contains("--min-answer"))
        .stdout(predicate::str::contains("--feedback"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--voice"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mock-interviewer"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mock-interviewer"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_init_set_get_list() {
    let home = TempDir::new().unwrap();

    mock_interviewer_bin(&home)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(home.path().join("mock-interviewer/config.toml").exists());

    mock_interviewer_bin(&home)
        .args(["config", "set", "max_questions", "3"])
        .assert()
        .success();
    mock_interviewer_bin(&home)
        .args(["config", "set", "gemini_api_key", "AIzaSyTestKey9876"])
        .assert()
        .success()
        .stderr(predicate::str::contains("AIzaSyTestKey9876").not());

    mock_interviewer_bin(&home)
        .args(["config", "get", "max_questions"])
        .assert()
        .success()
        .stdout("3\n");

    mock_interviewer_bin(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feedback_mode"))
        .stdout(predicate::str::contains("AIza...9876"))
        .stdout(predicate::str::contains("AIzaSyTestKey9876").not());
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .args(["config", "init"])
        .assert()
        .success();
    mock_interviewer_bin(&home)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn closed_stdin_at_role_prompt_exits_cleanly() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .env("GEMINI_API_KEY", "test-key")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target role:"));
}

#[test]
fn blank_role_is_prompted_again() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .env("GEMINI_API_KEY", "test-key")
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target role:").count(2));
}

#[test]
fn invalid_args() {
    let home = TempDir::new().unwrap();
    mock_interviewer_bin(&home)
        .arg("--invalid-flag")
        .assert()
        .code(2);
}
