//! Tests for `gampass run`.
//!
//! `sh` stands in for gam so the wrapped command can inspect the
//! decrypted files and pick its own exit code.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_sees_plaintext_and_reencrypts() {
    let t = Test::with_domains();
    t.wrap_with("sh");
    t.provision();

    let output = t.run(&["-c", "cat example.com/oauth2.txt > seen.txt"]);
    assert_success(&output);

    assert_eq!(t.read("seen.txt"), OAUTH2_TXT);
    for domain in [".", "example.com", "example.org"] {
        for name in SECRET_NAMES {
            assert_encrypted(&t, &format!("{}/{}", domain, name));
        }
    }
    assert!(!t.exists("gam.key"));
}

#[cfg(unix)]
#[test]
fn test_run_passes_exit_code_through() {
    let t = Test::with_domains();
    t.wrap_with("sh");
    assert_success(&t.encrypt());

    let output = t.run(&["-c", "exit 3"]);
    assert_eq!(output.status.code(), Some(3));
    assert_encrypted(&t, "oauth2.txt");
}

#[cfg(unix)]
#[test]
fn test_run_reencrypts_with_same_key() {
    let t = Test::with_domains();
    t.wrap_with("sh");
    assert_success(&t.encrypt());

    assert_success(&t.run(&["-c", "true"]));
    assert_success(&t.decrypt());
    assert_eq!(t.read("oauth2.txt"), OAUTH2_TXT);
}

#[cfg(unix)]
#[test]
fn test_run_picks_up_refreshed_token() {
    let t = Test::new();
    t.write("oauth2.txt", OAUTH2_TXT);
    t.wrap_with("sh");
    assert_success(&t.encrypt());

    assert_success(&t.run(&["-c", "printf refreshed > oauth2.txt"]));
    assert_encrypted(&t, "oauth2.txt");
    assert_success(&t.decrypt());
    assert_eq!(t.read("oauth2.txt"), "refreshed");
}

#[test]
fn test_run_missing_tool_decrypts_nothing() {
    let t = Test::with_domains();
    t.wrap_with("gampass-no-such-tool");
    assert_success(&t.encrypt());
    let before = t.snapshot();

    let output = t.run(&["info", "domain"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "wrapped command not found");
    assert_eq!(t.snapshot(), before);
}

#[test]
fn test_run_without_encrypted_secrets() {
    let t = Test::with_domains();
    t.wrap_with("sh");

    let output = t.run(&["-c", "true"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no encrypted secrets found");
}

#[cfg(unix)]
#[test]
fn test_interrupted_run_reencrypts() {
    use std::os::unix::process::CommandExt;
    use std::process::Stdio;
    use std::time::{Duration, Instant};

    let t = Test::with_domains();
    t.wrap_with("sh");
    assert_success(&t.encrypt());

    // Own process group, so the interrupt reaches gampass and the tool
    // together the way a terminal's Ctrl-C does.
    let mut child = t
        .process()
        .args(["run", "--", "-c", "sleep 5"])
        .process_group(0)
        .stdout(Stdio::null())
        .spawn()
        .expect("failed to spawn gampass run");

    let decrypted = || {
        [".", "example.com", "example.org"].iter().all(|domain| {
            SECRET_NAMES.iter().all(|name| {
                let rel = format!("{}/{}", domain, name);
                t.exists(&rel) && !t.exists(&format!("{}.encrypted", rel))
            })
        })
    };
    let deadline = Instant::now() + Duration::from_secs(10);
    while !decrypted() {
        assert!(Instant::now() < deadline, "gampass run never decrypted");
        std::thread::sleep(Duration::from_millis(20));
    }
    std::thread::sleep(Duration::from_millis(500));

    let kill = std::process::Command::new("kill")
        .args(["-INT", "--", &format!("-{}", child.id())])
        .status()
        .expect("failed to send SIGINT");
    assert!(kill.success());

    let status = child.wait().unwrap();
    assert_eq!(status.code(), Some(130));
    for domain in [".", "example.com", "example.org"] {
        for name in SECRET_NAMES {
            assert_encrypted(&t, &format!("{}/{}", domain, name));
        }
    }
}
