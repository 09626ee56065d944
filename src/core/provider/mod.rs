//! Key retrieval from an external secret store.
//!
//! The password manager is the system of record for the key. Providers
//! fetch it by a (vault, item, field) triple and can invalidate the store's
//! cached session afterwards.
//!
//! ## Adding a New Provider
//!
//! 1. Implement the `KeyProvider` trait
//! 2. Add the implementation in a new file (e.g., `bitwarden.rs`)
//! 3. Add a `ProviderKind` variant and wire it in `from_config`

use std::fmt;

use tracing::{debug, info, warn};

use crate::core::cipher::KeyMaterial;
use crate::core::config::{Config, ProviderKind};
use crate::error::Result;

mod env;
mod onepassword;

pub use env::Env;
pub use onepassword::OnePassword;

/// Identifies the key inside the secret store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRef {
    pub vault: String,
    pub item: String,
    pub field: String,
}

impl KeyRef {
    pub fn new(vault: &str, item: &str, field: &str) -> Self {
        Self {
            vault: vault.to_string(),
            item: item.to_string(),
            field: field.to_string(),
        }
    }
}

/// Rendered as a 1Password secret reference (`op://vault/item/field`).
impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op://{}/{}/{}", self.vault, self.item, self.field)
    }
}

/// External secret store trait.
pub trait KeyProvider {
    /// Fetch the key identified by `key_ref`. Blocks until the store answers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SecretUnavailable` when the store is unreachable,
    /// the item or field is missing, or authentication fails, and
    /// `StoreError::InvalidKey` when the stored value is not a key.
    fn fetch_key(&self, key_ref: &KeyRef) -> Result<KeyMaterial>;

    /// Invalidate the store's cached session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SignOutFailed`; callers treat this as advisory.
    fn sign_out(&self) -> Result<()>;

    /// Provider name for display.
    fn name(&self) -> &'static str;
}

/// Build the provider selected by configuration.
pub fn from_config(config: &Config) -> Box<dyn KeyProvider> {
    match config.store.provider {
        ProviderKind::OnePassword => {
            debug!("using 1Password provider");
            Box::new(OnePassword::new())
        }
        ProviderKind::Env => {
            debug!(var = %config.store.env_var, "using environment provider");
            Box::new(Env::new(&config.store.env_var))
        }
    }
}

/// Lazily fetched key for one invocation.
///
/// The store is contacted at most once, and only when an operation actually
/// needs key material. `finish` signs out if the store was contacted.
pub struct KeySession {
    provider: Box<dyn KeyProvider>,
    key_ref: KeyRef,
    key: Option<KeyMaterial>,
    contacted: bool,
}

impl KeySession {
    pub fn new(provider: Box<dyn KeyProvider>, key_ref: KeyRef) -> Self {
        Self {
            provider,
            key_ref,
            key: None,
            contacted: false,
        }
    }

    pub fn key_ref(&self) -> &KeyRef {
        &self.key_ref
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether the external store has been asked for anything.
    pub fn contacted(&self) -> bool {
        self.contacted
    }

    /// Return the key, fetching it from the store on first use.
    pub fn key(&mut self) -> Result<KeyMaterial> {
        if let Some(key) = &self.key {
            return Ok(key.clone());
        }

        info!(reference = %self.key_ref, provider = self.provider.name(), "fetching key");
        self.contacted = true;
        let key = self.provider.fetch_key(&self.key_ref)?;
        self.key = Some(key.clone());
        Ok(key)
    }

    /// Replace the key in hand without contacting the store.
    pub fn set_key(&mut self, key: KeyMaterial) {
        self.key = Some(key);
    }

    /// Best-effort sign-out. Failures are logged and otherwise ignored.
    pub fn finish(self) {
        if !self.contacted {
            return;
        }
        match self.provider.sign_out() {
            Ok(()) => debug!(provider = self.provider.name(), "signed out"),
            Err(e) => warn!(provider = self.provider.name(), error = %e, "sign-out failed"),
        }
    }
}
