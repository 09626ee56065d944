//! Tests for shell alias wiring.

use crate::support::*;

fn zshrc(t: &Test) -> String {
    std::fs::read_to_string(t.home.path().join(".zshrc")).unwrap_or_default()
}

#[test]
fn test_setup_wires_alias() {
    let t = Test::with_domains();

    let output = t.cmd().arg("setup").output().unwrap();
    assert_success(&output);

    let rc = zshrc(&t);
    assert_eq!(rc.matches("# >>> gampass >>>").count(), 1);
    assert!(rc.contains("alias gampass="));
    assert!(rc.contains(" run --'"));
}

#[test]
fn test_wiring_is_idempotent() {
    let t = Test::with_domains();
    assert_success(&t.cmd().arg("setup").output().unwrap());

    // Start over with a fresh setup in the same home.
    t.store_marker_key();
    assert_success(&t.decrypt());
    assert_success(&t.cmd().arg("setup").output().unwrap());

    assert_eq!(zshrc(&t).matches("# >>> gampass >>>").count(), 1);
}

#[test]
fn test_setup_no_alias_leaves_rc_alone() {
    let t = Test::with_domains();
    assert_success(&t.setup());
    assert!(!t.home.path().join(".zshrc").exists());
}

#[test]
fn test_wiring_follows_shell() {
    let t = Test::with_domains();

    let output = t
        .cmd()
        .env("SHELL", "/bin/bash")
        .arg("setup")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.home.path().join(".bashrc").exists());
    assert!(!t.home.path().join(".zshrc").exists());
}

#[test]
fn test_unwire_removes_block() {
    let t = Test::with_domains();
    std::fs::write(t.home.path().join(".zshrc"), "export EDITOR=vim\n").unwrap();
    assert_success(&t.cmd().arg("setup").output().unwrap());

    let output = t.cmd().arg("unwire").output().unwrap();
    assert_success(&output);
    assert_eq!(zshrc(&t), "export EDITOR=vim\n");

    let output = t.cmd().arg("unwire").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no gampass alias");
}
