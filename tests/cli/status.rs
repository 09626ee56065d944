//! Tests for `gampass status`.

use crate::support::*;

#[test]
fn test_status_empty_dir() {
    let t = Test::new();

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "no key");
    assert_stdout_contains(&output, "no GAM secrets found");
}

#[test]
fn test_status_json_states() {
    let t = Test::with_domains();

    let json = t.status_json();
    assert_eq!(json["state"], "secrets_decrypted");
    assert_eq!(json["secrets"].as_array().unwrap().len(), 9);
    assert_eq!(json["marker"], false);

    assert_success(&t.setup());
    let json = t.status_json();
    assert_eq!(json["state"], "key_generated");
    assert_eq!(json["marker"], true);

    t.store_marker_key();
    assert_success(&t.decrypt());
    assert_success(&t.encrypt());
    let json = t.status_json();
    assert_eq!(json["state"], "secrets_encrypted");
    assert!(json["secrets"]
        .as_array()
        .unwrap()
        .iter()
        .all(|s| s["state"] == "encrypted"));
}

#[test]
fn test_status_mixed_and_missing() {
    let t = Test::new();
    t.write("oauth2.txt", OAUTH2_TXT);
    assert_success(&t.encrypt());
    t.write("client_secrets.json", CLIENT_SECRETS_JSON);

    let json = t.status_json();
    assert_eq!(json["state"], "mixed");
    assert_eq!(json["missing"], serde_json::json!(["oauth2service.json"]));
}

#[test]
fn test_status_never_needs_key() {
    let t = Test::with_domains();
    assert_success(&t.encrypt());

    let output = t.cmd().env_remove("GAMPASS_KEY").arg("status").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted");
}
