//! Key material.

use std::fmt;
use std::str::FromStr;

use ::age::secrecy::ExposeSecret;
use ::age::x25519;
use zeroize::Zeroizing;

use crate::error::{Result, StoreError};

/// Symmetric key shared between the local machine and the secret store.
///
/// Serialized as an age secret key (`AGE-SECRET-KEY-1...`), which is what
/// gets pasted into the password manager.
#[derive(Clone)]
pub struct KeyMaterial {
    identity: x25519::Identity,
}

impl KeyMaterial {
    /// Generate a fresh random key.
    pub fn generate() -> Self {
        Self {
            identity: x25519::Identity::generate(),
        }
    }

    /// Parse a key string as stored in the secret store or key marker.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidKey` if the string is not an age secret key.
    pub fn parse(s: &str) -> Result<Self> {
        let identity = s
            .trim()
            .parse::<x25519::Identity>()
            .map_err(|e: &str| StoreError::InvalidKey(e.to_string()))?;
        Ok(Self { identity })
    }

    /// The key as a string, wiped from memory when dropped.
    pub fn expose(&self) -> Zeroizing<String> {
        Zeroizing::new(self.identity.to_string().expose_secret().to_string())
    }

    pub(crate) fn identity(&self) -> &x25519::Identity {
        &self.identity
    }

    pub(crate) fn recipient(&self) -> x25519::Recipient {
        self.identity.to_public()
    }
}

impl FromStr for KeyMaterial {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.recipient().to_string() == other.recipient().to_string()
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("public", &self.recipient().to_string())
            .finish_non_exhaustive()
    }
}
