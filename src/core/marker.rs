//! One-time key marker.
//!
//! `setup` writes the freshly generated key to `<base>/gam.key` so it can be
//! copied into the password manager. The first successful decrypt proves
//! the stored key works and removes the file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::cipher::KeyMaterial;
use crate::core::constants::KEY_MARKER_FILE;
use crate::error::{LifecycleError, Result};

/// The key marker file of a base directory.
#[derive(Debug, Clone)]
pub struct KeyMarker {
    path: PathBuf,
}

impl KeyMarker {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            path: base_dir.join(KEY_MARKER_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist `key`. Refuses to overwrite an existing marker.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::MarkerWrite` if the file exists or cannot be written.
    pub fn write(&self, key: &KeyMaterial) -> Result<()> {
        let map_err = |source| LifecycleError::MarkerWrite {
            path: self.path.clone(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(map_err)?;
        file.write_all(format!("{}\n", key.expose().as_str()).as_bytes())
            .map_err(map_err)?;
        file.sync_all().map_err(map_err)?;

        debug!(path = %self.path.display(), "key marker written");
        Ok(())
    }

    /// Delete the marker. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "key marker removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
