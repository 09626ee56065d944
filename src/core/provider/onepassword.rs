//! 1Password provider.
//!
//! Reads the key through the 1Password CLI.
//!
//! ## Requirements
//!
//! - `op` CLI must be installed and on `PATH`
//! - The account must be signed in, or `op` must be able to prompt
//!   (desktop app integration or an interactive terminal)

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::{KeyProvider, KeyRef};
use crate::core::cipher::KeyMaterial;
use crate::error::{Result, StoreError};

/// Key provider backed by the `op` CLI.
pub struct OnePassword {
    program: PathBuf,
}

impl OnePassword {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("op"),
        }
    }

    /// Use a specific `op` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the CLI on `PATH`.
    fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| {
            StoreError::SecretUnavailable(format!(
                "1Password CLI '{}' not found. Install it from https://developer.1password.com/docs/cli/",
                self.program.display()
            ))
            .into()
        })
    }
}

impl Default for OnePassword {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyProvider for OnePassword {
    fn name(&self) -> &'static str {
        "1password"
    }

    fn fetch_key(&self, key_ref: &KeyRef) -> Result<KeyMaterial> {
        let program = self.locate()?;
        trace!(program = %program.display(), reference = %key_ref, "reading key");

        // stdin stays attached so `op` can prompt for sign-in.
        let output = Command::new(&program)
            .args(["read", "--no-newline"])
            .arg(key_ref.to_string())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| StoreError::SecretUnavailable(format!("failed to run op: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::SecretUnavailable(format!(
                "op read {} failed: {}",
                key_ref,
                stderr.trim()
            ))
            .into());
        }

        let value = Zeroizing::new(String::from_utf8(output.stdout).map_err(|_| {
            StoreError::SecretUnavailable(format!("{} is not valid UTF-8", key_ref))
        })?);

        if value.trim().is_empty() {
            return Err(StoreError::SecretUnavailable(format!("{} is empty", key_ref)).into());
        }

        debug!(reference = %key_ref, "key read from 1Password");
        KeyMaterial::parse(&value)
    }

    fn sign_out(&self) -> Result<()> {
        let program = self
            .locate()
            .map_err(|e| StoreError::SignOutFailed(e.to_string()))?;

        let output = Command::new(&program)
            .arg("signout")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| StoreError::SignOutFailed(format!("failed to run op: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::SignOutFailed(stderr.trim().to_string()).into());
        }
        Ok(())
    }
}
