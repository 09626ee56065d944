//! Secret file discovery.
//!
//! Walks the base directory and reports, for every directory that holds at
//! least one form of an allow-listed secret, whether that secret is present
//! as plaintext, as ciphertext, or both. Nothing here touches the files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::constants::ENCRYPTED_SUFFIX;
use crate::error::Result;

/// On-disk state of one logical secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretState {
    Plaintext,
    Encrypted,
    /// Both forms exist, left behind by an interrupted transform.
    Both,
    Absent,
}

impl SecretState {
    fn from_presence(plain: bool, encrypted: bool) -> Self {
        match (plain, encrypted) {
            (true, true) => Self::Both,
            (true, false) => Self::Plaintext,
            (false, true) => Self::Encrypted,
            (false, false) => Self::Absent,
        }
    }

    /// Plaintext is on disk (alone or alongside ciphertext).
    pub fn has_plaintext(self) -> bool {
        matches!(self, Self::Plaintext | Self::Both)
    }

    /// Ciphertext is on disk (alone or alongside plaintext).
    pub fn has_ciphertext(self) -> bool {
        matches!(self, Self::Encrypted | Self::Both)
    }
}

impl std::fmt::Display for SecretState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Plaintext => "plaintext",
            Self::Encrypted => "encrypted",
            Self::Both => "both",
            Self::Absent => "absent",
        };
        f.write_str(label)
    }
}

/// A logical secret inside one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretFile {
    pub dir: PathBuf,
    pub name: String,
    pub state: SecretState,
}

impl SecretFile {
    /// Path of the plaintext form.
    pub fn plain_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Path of the encrypted form.
    pub fn encrypted_path(&self) -> PathBuf {
        self.dir.join(encrypted_name(&self.name))
    }
}

/// File name of the encrypted form of `name`.
pub fn encrypted_name(name: &str) -> String {
    format!("{}{}", name, ENCRYPTED_SUFFIX)
}

/// Enumerates allow-listed secrets below a base directory.
#[derive(Debug, Clone)]
pub struct Locator {
    base_dir: PathBuf,
    names: Vec<String>,
    recursive: bool,
}

impl Locator {
    pub fn new(base_dir: impl Into<PathBuf>, names: &[String], recursive: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            names: names.to_vec(),
            recursive,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Classify a single secret in `dir`.
    pub fn classify(&self, dir: &Path, name: &str) -> SecretFile {
        let plain = dir.join(name).is_file();
        let encrypted = dir.join(encrypted_name(name)).is_file();
        SecretFile {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            state: SecretState::from_presence(plain, encrypted),
        }
    }

    /// Every present secret, in traversal order (directories sorted by name,
    /// allow-list order within a directory). Absent secrets are omitted.
    ///
    /// # Errors
    ///
    /// Fails if the base directory itself cannot be read. Unreadable
    /// sub-directories are skipped.
    pub fn scan(&self) -> Result<Vec<SecretFile>> {
        let max_depth = if self.recursive { usize::MAX } else { 0 };
        let mut found = Vec::new();

        let walker = WalkDir::new(&self.base_dir)
            .max_depth(max_depth)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("unreadable base directory"))
                        .into())
                }
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            trace!(dir = %entry.path().display(), "scanning directory");
            for name in &self.names {
                let secret = self.classify(entry.path(), name);
                if secret.state != SecretState::Absent {
                    found.push(secret);
                }
            }
        }

        debug!(found = found.len(), base = %self.base_dir.display(), "scan complete");
        Ok(found)
    }

    /// Secrets whose plaintext form is present.
    pub fn plaintext(&self) -> Result<Vec<SecretFile>> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|s| s.state.has_plaintext())
            .collect())
    }

    /// Secrets whose encrypted form is present.
    pub fn encrypted(&self) -> Result<Vec<SecretFile>> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|s| s.state.has_ciphertext())
            .collect())
    }
}
