//! Per-file encrypt/decrypt.
//!
//! Each transform reads the whole source into memory, writes the result to
//! a temporary file beside the destination, renames it into place, and only
//! then deletes the source. A crash can therefore leave both forms on disk
//! but never a half-written destination. Secrets found in that state are
//! reconciled here before anything is overwritten.

use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher::{Age, Cipher, KeyMaterial};
use crate::core::locator::{SecretFile, SecretState};
use crate::error::Result;

/// What happened to one secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Encrypted,
    Decrypted,
    /// Both forms existed and matched; the stale one was removed.
    Reconciled,
    /// Both forms existed and differ; left untouched.
    Skipped,
    /// Nothing in the requested source form.
    Untouched,
}

/// Applies a cipher to secret files.
pub struct Transform<C = Age> {
    cipher: C,
}

impl Transform<Age> {
    pub fn new() -> Self {
        Self { cipher: Age }
    }
}

impl Default for Transform<Age> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cipher<Key = KeyMaterial>> Transform<C> {
    /// Encrypt the plaintext form of `secret` and remove it.
    ///
    /// When the ciphertext already exists and decrypts to the current
    /// plaintext, only the stale plaintext is removed. Otherwise the
    /// plaintext wins and is re-encrypted over the ciphertext.
    pub fn encrypt(&self, secret: &SecretFile, key: &KeyMaterial) -> Result<FileOutcome> {
        let plain_path = secret.plain_path();
        let enc_path = secret.encrypted_path();

        match secret.state {
            SecretState::Plaintext => {}
            SecretState::Both => {
                let plaintext = Zeroizing::new(fs::read(&plain_path)?);
                if self.ciphertext_matches(&enc_path, &plaintext, key) {
                    fs::remove_file(&plain_path)?;
                    debug!(path = %plain_path.display(), "removed stale plaintext");
                    return Ok(FileOutcome::Reconciled);
                }
                debug!(path = %enc_path.display(), "ciphertext out of date, re-encrypting");
            }
            SecretState::Encrypted | SecretState::Absent => return Ok(FileOutcome::Untouched),
        }

        debug!(cipher = self.cipher.name(), path = %plain_path.display(), "encrypting");
        let plaintext = Zeroizing::new(fs::read(&plain_path)?);
        let ciphertext = self.cipher.encrypt(&plaintext, key)?;
        write_atomic(&enc_path, &ciphertext, false)?;
        fs::remove_file(&plain_path)?;
        Ok(FileOutcome::Encrypted)
    }

    /// Decrypt the encrypted form of `secret` and remove it.
    ///
    /// Nothing is written unless decryption succeeds. When a plaintext
    /// already exists it is never overwritten: a matching pair drops the
    /// stale ciphertext, a differing pair is skipped.
    pub fn decrypt(&self, secret: &SecretFile, key: &KeyMaterial) -> Result<FileOutcome> {
        let plain_path = secret.plain_path();
        let enc_path = secret.encrypted_path();

        match secret.state {
            SecretState::Encrypted => {}
            SecretState::Both => {
                let ciphertext = fs::read(&enc_path)?;
                let decrypted = Zeroizing::new(self.cipher.decrypt(&ciphertext, key)?);
                let plaintext = Zeroizing::new(fs::read(&plain_path)?);
                if digest(&decrypted) == digest(&plaintext) {
                    fs::remove_file(&enc_path)?;
                    debug!(path = %enc_path.display(), "removed stale ciphertext");
                    return Ok(FileOutcome::Reconciled);
                }
                warn!(
                    path = %plain_path.display(),
                    "plaintext differs from ciphertext, keeping both"
                );
                return Ok(FileOutcome::Skipped);
            }
            SecretState::Plaintext | SecretState::Absent => return Ok(FileOutcome::Untouched),
        }

        debug!(cipher = self.cipher.name(), path = %enc_path.display(), "decrypting");
        let ciphertext = fs::read(&enc_path)?;
        let plaintext = Zeroizing::new(self.cipher.decrypt(&ciphertext, key)?);
        write_atomic(&plain_path, &plaintext, true)?;
        fs::remove_file(&enc_path)?;
        Ok(FileOutcome::Decrypted)
    }

    fn ciphertext_matches(&self, enc_path: &Path, plaintext: &[u8], key: &KeyMaterial) -> bool {
        let Ok(ciphertext) = fs::read(enc_path) else {
            return false;
        };
        match self.cipher.decrypt(&ciphertext, key) {
            Ok(decrypted) => digest(&Zeroizing::new(decrypted)) == digest(plaintext),
            Err(e) => {
                debug!(path = %enc_path.display(), error = %e, "existing ciphertext unreadable");
                false
            }
        }
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

/// Write `bytes` to `dest` via a temp file in the same directory and an
/// atomic rename. `private` restricts the result to the owner on Unix.
pub fn write_atomic(dest: &Path, bytes: &[u8], private: bool) -> Result<()> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".gampass-")
        .suffix(".tmp")
        .tempfile_in(dir)?;

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = if private { 0o600 } else { 0o644 };
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = private;

    tmp.persist(dest).map_err(|e| e.error)?;
    debug!(path = %dest.display(), bytes = bytes.len(), "written");
    Ok(())
}
