//! Cryptographic operations.
//!
//! Provides the encryption/decryption abstraction used for secret files and
//! the default age implementation.
//!
//! ## Scheme
//!
//! The key is a single age X25519 identity. Files are encrypted to its
//! public half and decrypted with the identity itself, so holding the key
//! string is enough for both directions. Every file gets a fresh file key
//! and payload nonce; the payload is ChaCha20-Poly1305, so tampering or a
//! different key is rejected rather than yielding garbage.

use crate::error::Result;

mod age;
mod key;

pub use age::Age;
pub use key::KeyMaterial;

/// Cryptographic backend trait.
///
/// Abstracts whole-buffer encryption so the file transform does not care
/// which scheme sits underneath.
pub trait Cipher {
    /// Key type accepted by this backend.
    type Key;

    /// Encrypt `plaintext` under `key`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], key: &Self::Key) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` with `key`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the ciphertext was altered,
    /// truncated, or produced under a different key.
    fn decrypt(&self, ciphertext: &[u8], key: &Self::Key) -> Result<Vec<u8>>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;
}

/// Encrypt with the default age backend.
pub fn encrypt(plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    Age.encrypt(plaintext, key)
}

/// Decrypt with the default age backend.
pub fn decrypt(ciphertext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
    Age.decrypt(ciphertext, key)
}
