//! Environment variable provider.
//!
//! Takes the key from a variable such as `GAMPASS_KEY`. Meant for CI jobs
//! and machines where the key is injected by something else (`op run`,
//! a secrets-aware scheduler). There is no session to sign out of.

use tracing::debug;
use zeroize::Zeroizing;

use super::{KeyProvider, KeyRef};
use crate::core::cipher::KeyMaterial;
use crate::error::{Result, StoreError};

/// Key provider reading an environment variable.
pub struct Env {
    var: String,
}

impl Env {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl KeyProvider for Env {
    fn name(&self) -> &'static str {
        "env"
    }

    fn fetch_key(&self, key_ref: &KeyRef) -> Result<KeyMaterial> {
        let value = Zeroizing::new(std::env::var(&self.var).map_err(|_| {
            StoreError::SecretUnavailable(format!(
                "{} is not set (expected the value of {})",
                self.var, key_ref
            ))
        })?);

        if value.trim().is_empty() {
            return Err(StoreError::SecretUnavailable(format!("{} is empty", self.var)).into());
        }

        debug!(var = %self.var, "key read from environment");
        KeyMaterial::parse(&value)
    }

    fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}
