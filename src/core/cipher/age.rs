//! Age encryption backend implementation.
//!
//! Produces binary age files (no ASCII armor) so the encrypted secret is a
//! byte-for-byte age file that the `age` CLI can also open with the key.

use std::io::{Read, Write};

use tracing::trace;

use super::{Cipher, KeyMaterial};
use crate::error::{CipherError, Result};

/// Age-based cryptographic backend keyed by a single X25519 identity.
pub struct Age;

impl Cipher for Age {
    type Key = KeyMaterial;

    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let recipient = key.recipient();
        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::with_capacity(plaintext.len() + 256);
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8], key: &KeyMaterial) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let decryptor = age::Decryptor::new(ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(key.identity() as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        // Payload authentication failures surface as read errors.
        let mut decrypted = Vec::new();
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(decrypted)
    }
}
