//! Tests for `gampass sync`.

use crate::support::*;

#[test]
fn test_sync_covers_new_domain() {
    let t = Test::with_domains();
    t.provision();
    t.write_domain("example.net");

    let output = t.sync();
    assert_success(&output);

    for domain in [".", "example.com", "example.org", "example.net"] {
        for name in SECRET_NAMES {
            assert_encrypted(&t, &format!("{}/{}", domain, name));
        }
    }
    assert!(!t.exists("gam.key"));

    assert_success(&t.decrypt());
    assert_eq!(t.read("example.net/oauth2.txt"), OAUTH2_TXT);
}

#[test]
fn test_sync_requires_encrypted_secrets() {
    let t = Test::with_domains();
    let before = t.snapshot();

    let output = t.sync();
    assert_failure(&output);
    assert_eq!(t.snapshot(), before);
}

#[test]
fn test_sync_does_not_write_marker() {
    let t = Test::with_domains();
    assert_success(&t.encrypt());

    assert_success(&t.sync());
    assert!(!t.exists("gam.key"));
    assert_encrypted(&t, "example.org/client_secrets.json");
}
