//! Error types.
//!
//! Every failure surfaces as [`Error`], split by the layer it came from so
//! the binary can attach a hint and pick an exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("base directory not found: {0}")]
    BaseDirMissing(PathBuf),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Errors from the external secret store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("secret unavailable: {0}")]
    SecretUnavailable(String),

    #[error("sign-out failed: {0}")]
    SignOutFailed(String),

    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Errors from the cipher layer.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Errors from lifecycle operations.
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("no encrypted secrets found in {0}")]
    NoEncryptedSecretsFound(PathBuf),

    #[error("secrets in {0} are already encrypted with the stored key")]
    SecretsAlreadyEncrypted(PathBuf),

    #[error("failed to write key marker {path}: {source}")]
    MarkerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Errors from shell wiring and the wrapped command.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("failed to update {path}: {source}")]
    RcWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot embed path in a shell alias: {0}")]
    UnsafePath(PathBuf),

    #[error("wrapped command not found: {0}")]
    CommandNotFound(String),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True when the failure came from decrypting with the wrong key or
    /// from corrupted ciphertext.
    pub fn is_decryption_failure(&self) -> bool {
        match self {
            Error::Cipher(CipherError::DecryptionFailed(_)) => true,
            Error::Lifecycle(LifecycleError::File { source, .. }) => source.is_decryption_failure(),
            _ => false,
        }
    }

    /// True when the key could not be fetched from the secret store.
    pub fn is_secret_unavailable(&self) -> bool {
        matches!(self, Error::Store(StoreError::SecretUnavailable(_)))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
