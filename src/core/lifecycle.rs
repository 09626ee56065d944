//! Setup, encrypt, decrypt, sync, and wrapped runs.
//!
//! Nothing is persisted between invocations except the files themselves:
//! the state is read back from which forms are on disk and whether the key
//! marker exists. The key is fetched lazily through a [`KeySession`] and
//! handed explicitly to every transform.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::cipher::KeyMaterial;
use crate::core::config::Config;
use crate::core::locator::{Locator, SecretFile, SecretState};
use crate::core::marker::KeyMarker;
use crate::core::provider::{self, KeyProvider, KeySession};
use crate::core::runner;
use crate::core::shell::{ShellWiring, WireOutcome};
use crate::core::transform::{FileOutcome, Transform};
use crate::error::{ConfigError, LifecycleError, Result};

/// Lifecycle state inferred from disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// No marker and no secrets.
    NoKey,
    /// Marker present: a key was generated but not yet confirmed by a decrypt.
    KeyGenerated,
    /// Every secret is encrypted.
    SecretsEncrypted,
    /// Every secret is plaintext.
    SecretsDecrypted,
    /// Some of each, or interrupted transforms.
    Mixed,
}

impl LifecycleState {
    pub fn infer(marker_exists: bool, secrets: &[SecretFile]) -> Self {
        if marker_exists {
            return Self::KeyGenerated;
        }
        if secrets.is_empty() {
            return Self::NoKey;
        }
        if secrets.iter().all(|s| s.state == SecretState::Encrypted) {
            Self::SecretsEncrypted
        } else if secrets.iter().all(|s| s.state == SecretState::Plaintext) {
            Self::SecretsDecrypted
        } else {
            Self::Mixed
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NoKey => "no key",
            Self::KeyGenerated => "key generated (not yet confirmed)",
            Self::SecretsEncrypted => "encrypted",
            Self::SecretsDecrypted => "decrypted",
            Self::Mixed => "mixed",
        };
        f.write_str(label)
    }
}

/// Files touched by one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub encrypted: Vec<PathBuf>,
    pub decrypted: Vec<PathBuf>,
    pub reconciled: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub marker_removed: bool,
}

impl Report {
    fn record(&mut self, secret: &SecretFile, outcome: FileOutcome) {
        let path = secret.plain_path();
        match outcome {
            FileOutcome::Encrypted => self.encrypted.push(path),
            FileOutcome::Decrypted => self.decrypted.push(path),
            FileOutcome::Reconciled => self.reconciled.push(path),
            FileOutcome::Skipped => self.skipped.push(path),
            FileOutcome::Untouched => {}
        }
    }

    /// Number of secrets changed or cleaned up.
    pub fn changed(&self) -> usize {
        self.encrypted.len() + self.decrypted.len() + self.reconciled.len()
    }

    /// Distinct directories (GAM domains) involved.
    pub fn directories(&self) -> usize {
        self.encrypted
            .iter()
            .chain(&self.decrypted)
            .chain(&self.reconciled)
            .chain(&self.skipped)
            .filter_map(|p| p.parent())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Result of `setup`.
#[derive(Debug)]
pub enum SetupOutcome {
    /// A key was generated and the secrets encrypted with it.
    Provisioned {
        key: KeyMaterial,
        marker: PathBuf,
        report: Report,
        wiring: WireOutcome,
    },
    /// A marker already exists; nothing was changed.
    AlreadyInitialized { marker: PathBuf },
    /// No plaintext secrets; the marker was removed again.
    NothingToEncrypt,
}

/// Result of `encrypt`.
#[derive(Debug)]
pub enum EncryptOutcome {
    Encrypted(Report),
    NothingToDo,
}

/// Result of `sync`.
#[derive(Debug)]
pub struct SyncOutcome {
    pub decrypted: Report,
    pub encrypted: EncryptOutcome,
}

/// Result of a wrapped run.
#[derive(Debug)]
pub struct RunOutcome {
    pub decrypted: Report,
    pub exit_code: i32,
    pub encrypted: EncryptOutcome,
}

/// Orchestrates secret operations for one base directory.
pub struct Lifecycle {
    base_dir: PathBuf,
    config: Config,
    locator: Locator,
    marker: KeyMarker,
    session: KeySession,
    transform: Transform,
}

impl Lifecycle {
    /// Open `base_dir` with its configuration and configured provider.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BaseDirMissing` if `base_dir` is not a directory,
    /// or any configuration error.
    pub fn open(base_dir: &Path) -> Result<Self> {
        let config = Config::load(base_dir)?;
        let provider = provider::from_config(&config);
        Self::with_provider(base_dir, config, provider)
    }

    /// Open `base_dir` with an explicit configuration and provider.
    pub fn with_provider(
        base_dir: &Path,
        config: Config,
        provider: Box<dyn KeyProvider>,
    ) -> Result<Self> {
        if !base_dir.is_dir() {
            return Err(ConfigError::BaseDirMissing(base_dir.to_path_buf()).into());
        }
        let locator = Locator::new(
            base_dir,
            &config.secrets.names,
            config.secrets.recursive,
        );
        let session = KeySession::new(provider, config.key_ref());
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            marker: KeyMarker::new(base_dir),
            locator,
            session,
            transform: Transform::new(),
            config,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn marker(&self) -> &KeyMarker {
        &self.marker
    }

    pub fn session(&self) -> &KeySession {
        &self.session
    }

    /// Every present secret and the inferred state.
    pub fn status(&self) -> Result<(LifecycleState, Vec<SecretFile>)> {
        let secrets = self.locator.scan()?;
        Ok((
            LifecycleState::infer(self.marker.exists(), &secrets),
            secrets,
        ))
    }

    /// Allow-listed names with no form present in the base directory.
    pub fn missing(&self) -> Vec<String> {
        self.locator
            .names()
            .iter()
            .filter(|name| self.locator.classify(&self.base_dir, name).state == SecretState::Absent)
            .cloned()
            .collect()
    }

    /// Generate a key, record it in the marker, encrypt every plaintext
    /// secret with it, and wire the shell alias.
    ///
    /// If the encryption step fails part-way the marker is kept, since it
    /// holds the only copy of the key used for the files already encrypted.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::SecretsAlreadyEncrypted` when any secret
    /// already has an encrypted form; new plaintext joins those through `sync`.
    pub fn setup(&mut self, wiring: Option<&ShellWiring>) -> Result<SetupOutcome> {
        if self.marker.exists() {
            warn!(path = %self.marker.path().display(), "key marker already exists");
            return Ok(SetupOutcome::AlreadyInitialized {
                marker: self.marker.path().to_path_buf(),
            });
        }

        // A fresh key would orphan ciphertext already written with the stored one.
        if !self.locator.encrypted()?.is_empty() {
            return Err(LifecycleError::SecretsAlreadyEncrypted(self.base_dir.clone()).into());
        }

        info!(base = %self.base_dir.display(), "generating key");
        let key = KeyMaterial::generate();
        self.marker.write(&key)?;
        self.session.set_key(key.clone());

        let report = match self.encrypt()? {
            EncryptOutcome::Encrypted(report) => report,
            EncryptOutcome::NothingToDo => {
                self.marker.remove()?;
                return Ok(SetupOutcome::NothingToEncrypt);
            }
        };

        let wiring = match wiring {
            Some(w) => w.wire().unwrap_or_else(|e| {
                warn!(error = %e, "could not wire shell alias");
                WireOutcome::Failed(e.to_string())
            }),
            None => WireOutcome::Disabled,
        };

        Ok(SetupOutcome::Provisioned {
            key,
            marker: self.marker.path().to_path_buf(),
            report,
            wiring,
        })
    }

    /// Encrypt every secret that has a plaintext form.
    ///
    /// With no plaintext present the store is never contacted.
    pub fn encrypt(&mut self) -> Result<EncryptOutcome> {
        let candidates = self.locator.plaintext()?;
        if candidates.is_empty() {
            info!(base = %self.base_dir.display(), "no plaintext secrets");
            return Ok(EncryptOutcome::NothingToDo);
        }

        let key = self.session.key()?;
        let mut report = Report::default();
        for secret in &candidates {
            let outcome = self
                .transform
                .encrypt(secret, &key)
                .map_err(|e| file_error(secret, e))?;
            debug!(path = %secret.plain_path().display(), ?outcome, "encrypt");
            report.record(secret, outcome);
        }

        info!(
            encrypted = report.encrypted.len(),
            reconciled = report.reconciled.len(),
            "encrypt complete"
        );
        Ok(EncryptOutcome::Encrypted(report))
    }

    /// Decrypt every secret that has an encrypted form and drop the key
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NoEncryptedSecretsFound` when there is
    /// nothing to decrypt, before contacting the store. A decryption failure
    /// aborts the run; files already decrypted stay decrypted.
    pub fn decrypt(&mut self) -> Result<Report> {
        let candidates = self.locator.encrypted()?;
        if candidates.is_empty() {
            return Err(LifecycleError::NoEncryptedSecretsFound(self.base_dir.clone()).into());
        }

        let key = self.session.key()?;
        let mut report = Report::default();
        for secret in &candidates {
            let outcome = self
                .transform
                .decrypt(secret, &key)
                .map_err(|e| file_error(secret, e))?;
            debug!(path = %secret.encrypted_path().display(), ?outcome, "decrypt");
            report.record(secret, outcome);
        }

        report.marker_removed = self.marker.remove()?;
        info!(
            decrypted = report.decrypted.len(),
            reconciled = report.reconciled.len(),
            skipped = report.skipped.len(),
            "decrypt complete"
        );
        Ok(report)
    }

    /// Decrypt everything, then re-encrypt every plaintext secret (including
    /// ones in domains that were never encrypted) with the stored key.
    pub fn sync(&mut self) -> Result<SyncOutcome> {
        let decrypted = self.decrypt()?;
        info!("re-encrypting with existing key");
        let encrypted = self.encrypt()?;
        Ok(SyncOutcome {
            decrypted,
            encrypted,
        })
    }

    /// Decrypt, run the wrapped tool to completion, and re-encrypt with the
    /// same key whatever the tool's exit status.
    ///
    /// The tool is not started if it cannot be found or if decryption fails.
    /// Terminal signals are ignored from the spawn until re-encryption is
    /// done, so an interrupted tool still leaves its secrets encrypted.
    pub fn run(&mut self, args: &[String]) -> Result<RunOutcome> {
        let program = runner::resolve(&self.config.wrap.command)?;
        let decrypted = self.decrypt()?;

        let shield = runner::SignalShield::raise();
        let exit_code = match runner::run(&program, args, &shield) {
            Ok(code) => code,
            Err(e) => {
                // Credentials must not stay decrypted because the spawn failed.
                self.encrypt()?;
                return Err(e);
            }
        };

        let encrypted = self.encrypt()?;
        drop(shield);
        Ok(RunOutcome {
            decrypted,
            exit_code,
            encrypted,
        })
    }

    /// Sign out of the store if it was contacted.
    pub fn finish(self) {
        self.session.finish();
    }
}

fn file_error(secret: &SecretFile, source: crate::error::Error) -> crate::error::Error {
    LifecycleError::File {
        path: secret.plain_path(),
        source: Box::new(source),
    }
    .into()
}
