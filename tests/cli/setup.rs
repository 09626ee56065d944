//! Tests for `gampass setup`.

use crate::support::*;

#[test]
fn test_setup_encrypts_every_domain() {
    let t = Test::with_domains();

    let output = t.setup();
    assert_success(&output);

    for domain in [".", "example.com", "example.org"] {
        for name in SECRET_NAMES {
            assert_encrypted(&t, &format!("{}/{}", domain, name));
        }
    }
    assert!(t.exists("gam.key"));
    assert_stdout_contains(&output, "encrypted 9 secrets for 3 Google Workspace domains");
}

#[test]
fn test_setup_prints_key_and_instructions() {
    let t = Test::with_domains();

    let output = t.setup();
    assert_success(&output);

    let key = t.read("gam.key");
    assert!(key.trim().starts_with("AGE-SECRET-KEY-1"));
    assert_stdout_contains(&output, key.trim());
    assert_stdout_contains(&output, "1Password");
    assert_stdout_contains(&output, "op://gampass/gamkey/password");
}

#[cfg(unix)]
#[test]
fn test_setup_marker_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_domains();
    assert_success(&t.setup());

    let mode = std::fs::metadata(t.path("gam.key"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_generate_alias() {
    let t = Test::with_domains();

    let output = t
        .cmd()
        .args(["generate", "--no-alias"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_encrypted(&t, "oauth2.txt");
}

#[test]
fn test_setup_twice_changes_nothing() {
    let t = Test::with_domains();
    assert_success(&t.setup());
    let before = t.snapshot();

    let output = t.setup();
    assert_success(&output);
    assert_stdout_contains(&output, "already exists");
    assert_eq!(t.snapshot(), before);
}

#[test]
fn test_setup_without_secrets() {
    let t = Test::new();

    let output = t.setup();
    assert_success(&output);
    assert_stdout_contains(&output, "no unencrypted secrets found");
    assert!(!t.exists("gam.key"));
}

#[test]
fn test_setup_key_decrypts_once_stored() {
    let t = Test::with_domains();
    t.provision();

    assert_success(&t.decrypt());
    assert_eq!(t.read("example.com/oauth2.txt"), OAUTH2_TXT);
    assert_eq!(t.read("client_secrets.json"), CLIENT_SECRETS_JSON);
}

#[test]
fn test_setup_refuses_once_secrets_are_encrypted() {
    let t = Test::new();
    t.write("a.com/oauth2.txt", OAUTH2_TXT);
    assert_success(&t.encrypt());
    t.write("b.com/oauth2.txt", "second domain");
    let before = t.snapshot();

    let output = t.setup();
    assert_failure(&output);
    assert_stderr_contains(&output, "already encrypted");
    assert_stderr_contains(&output, "gampass sync");
    assert_eq!(t.snapshot(), before);
    assert!(!t.exists("gam.key"));

    // The stored key still opens the existing ciphertext.
    assert_success(&t.sync());
    assert_encrypted(&t, "b.com/oauth2.txt");
    assert_success(&t.decrypt());
    assert_eq!(t.read("a.com/oauth2.txt"), OAUTH2_TXT);
    assert_eq!(t.read("b.com/oauth2.txt"), "second domain");
}
