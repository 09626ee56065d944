//! Tests for help, aliases, and error handling.

use crate::support::*;

#[test]
fn test_no_command_shows_help() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_unknown_command_shows_help() {
    let t = Test::with_domains();
    let before = t.snapshot();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
    assert_eq!(t.snapshot(), before);
}

#[cfg(target_os = "linux")]
#[test]
fn test_unknown_command_help_write_failure() {
    let t = Test::new();
    let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();

    let output = t
        .process()
        .arg("unknown-command")
        .stdout(full)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_commands_are_case_insensitive() {
    let t = Test::with_domains();

    assert_success(&t.cmd().arg("ENCRYPT").output().unwrap());
    assert_encrypted(&t, "oauth2.txt");

    assert_success(&t.cmd().arg("Decrypt").output().unwrap());
    assert_plaintext(&t, "oauth2.txt");
}

#[test]
fn test_updates_alias() {
    let t = Test::new();

    for name in ["update", "updates", "Updates"] {
        let output = t.cmd().arg(name).output().unwrap();
        assert_success(&output);
        assert_stdout_contains(&output, "GamUpdates");
    }
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();

    let output = t.cmd().args(["--verbose", "status"]).output().unwrap();
    assert_success(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "gampass");
}

#[test]
fn test_missing_dir() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["decrypt", "--dir", "/nonexistent/gam/config"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "base directory not found");
    assert_stderr_contains(&output, "GAMPASS_DIR");
}

#[test]
fn test_invalid_config() {
    let t = Test::with_domains();
    t.write("gampass.toml", "[store]\nprovider = \"keychain\"\n");

    let output = t.cmd().env_remove("GAMPASS_PROVIDER").arg("status").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "config");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "_gampass");
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "#compdef gampass");
}
