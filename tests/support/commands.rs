//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a gampass command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - the `env` provider holding the test key
    /// - Current directory set to the GAM directory
    pub fn cmd(&self) -> Command {
        Command::from_std(self.process())
    }

    /// The same invocation as [`Test::cmd`] as a plain process, for tests
    /// that need to signal it while it runs.
    pub fn process(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_gampass"));
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("SHELL", "/bin/zsh");
        cmd.env("NO_COLOR", "1");
        cmd.env("GAMPASS_PROVIDER", "env");
        cmd.env("GAMPASS_KEY", self.key());
        cmd.env_remove("GAMPASS_DIR");
        cmd.env_remove("GAMPASS_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `gampass setup --no-alias`.
    pub fn setup(&self) -> Output {
        self.cmd()
            .args(["setup", "--no-alias"])
            .output()
            .expect("failed to run gampass setup")
    }

    /// Run setup and move the generated key into the store.
    pub fn provision(&self) {
        let output = self.setup();
        super::assert_success(&output);
        self.store_marker_key();
    }

    /// Shortcut for `gampass encrypt`.
    pub fn encrypt(&self) -> Output {
        self.cmd()
            .arg("encrypt")
            .output()
            .expect("failed to run gampass encrypt")
    }

    /// Shortcut for `gampass decrypt`.
    pub fn decrypt(&self) -> Output {
        self.cmd()
            .arg("decrypt")
            .output()
            .expect("failed to run gampass decrypt")
    }

    /// Shortcut for `gampass sync`.
    pub fn sync(&self) -> Output {
        self.cmd()
            .arg("sync")
            .output()
            .expect("failed to run gampass sync")
    }

    /// Shortcut for `gampass status`.
    pub fn status(&self) -> Output {
        self.cmd()
            .arg("status")
            .output()
            .expect("failed to run gampass status")
    }

    /// Shortcut for `gampass status --json`.
    pub fn status_json(&self) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["status", "--json"])
            .output()
            .expect("failed to run gampass status --json");
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("status --json is not JSON")
    }

    /// Shortcut for `gampass run -- <args>`.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.arg("run").arg("--");
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("failed to run gampass run")
    }
}
