//! Configuration file management.
//!
//! Reads the optional `gampass.toml` from the base directory. Every field
//! has a default, so a missing file means "use the stock GAM layout and the
//! `gampass/gamkey/password` 1Password item".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::core::constants;
use crate::core::provider::KeyRef;
use crate::error::{ConfigError, Result};

/// Configuration stored in `gampass.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the key lives.
    pub store: StoreConfig,
    /// Which files are protected.
    pub secrets: SecretsConfig,
    /// The wrapped administrative tool and its shell alias.
    pub wrap: WrapConfig,
}

/// External secret store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub provider: ProviderKind,
    pub vault: String,
    pub item: String,
    pub field: String,
    /// Variable read by the `env` provider.
    pub env_var: String,
}

/// Key provider backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// 1Password via the `op` CLI.
    #[default]
    #[serde(rename = "1password", alias = "op")]
    OnePassword,
    /// Key taken from an environment variable.
    #[serde(rename = "env")]
    Env,
}

/// Secret file discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    pub names: Vec<String>,
    /// Descend into sub-directories (one per GAM domain).
    pub recursive: bool,
}

/// Wrapped command settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    pub command: String,
    pub alias: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell_rc: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            vault: constants::DEFAULT_VAULT.to_string(),
            item: constants::DEFAULT_ITEM.to_string(),
            field: constants::DEFAULT_FIELD.to_string(),
            env_var: constants::DEFAULT_KEY_ENV.to_string(),
        }
    }
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            names: constants::SECRET_NAMES.iter().map(|s| s.to_string()).collect(),
            recursive: true,
        }
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            command: constants::DEFAULT_WRAPPED_COMMAND.to_string(),
            alias: constants::DEFAULT_ALIAS.to_string(),
            shell_rc: None,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1password" | "op" => Ok(Self::OnePassword),
            "env" => Ok(Self::Env),
            other => Err(ConfigError::InvalidValue {
                field: "store.provider",
                reason: format!("unknown provider '{}' (expected 1password or env)", other),
            }),
        }
    }
}

impl Config {
    /// Path to the configuration file inside `base_dir`.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(constants::CONFIG_FILE)
    }

    /// Load configuration for `base_dir`, falling back to defaults when no
    /// file exists, then apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` when validation fails.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = Self::config_path(base_dir);
        let mut config = if path.is_file() {
            debug!(path = %path.display(), "loading config");
            let contents = std::fs::read_to_string(&path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&contents).map_err(ConfigError::Parse)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_overrides(std::env::var(constants::PROVIDER_ENV).ok().as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a provider override (normally from `GAMPASS_PROVIDER`).
    pub fn apply_overrides(&mut self, provider: Option<&str>) -> Result<()> {
        if let Some(provider) = provider.filter(|p| !p.trim().is_empty()) {
            self.store.provider = provider.parse()?;
            debug!(provider = ?self.store.provider, "provider overridden from environment");
        }
        Ok(())
    }

    /// Validate field contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("store.vault", &self.store.vault),
            ("store.item", &self.store.item),
            ("store.field", &self.store.field),
            ("store.env_var", &self.store.env_var),
            ("wrap.command", &self.wrap.command),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if self.secrets.names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "secrets.names",
                reason: "at least one secret file name is required".to_string(),
            }
            .into());
        }

        for name in &self.secrets.names {
            if name.is_empty()
                || name.contains('/')
                || name.contains('\\')
                || name == "."
                || name == ".."
            {
                return Err(ConfigError::InvalidValue {
                    field: "secrets.names",
                    reason: format!("'{}' is not a plain file name", name),
                }
                .into());
            }
            if name.ends_with(constants::ENCRYPTED_SUFFIX) {
                return Err(ConfigError::InvalidValue {
                    field: "secrets.names",
                    reason: format!(
                        "'{}' already carries the {} suffix",
                        name,
                        constants::ENCRYPTED_SUFFIX
                    ),
                }
                .into());
            }
        }

        let alias_ok = !self.wrap.alias.is_empty()
            && self
                .wrap
                .alias
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !alias_ok {
            return Err(ConfigError::InvalidValue {
                field: "wrap.alias",
                reason: format!("'{}' is not a valid alias name", self.wrap.alias),
            }
            .into());
        }

        Ok(())
    }

    /// The (vault, item, field) triple identifying the key.
    pub fn key_ref(&self) -> KeyRef {
        KeyRef::new(&self.store.vault, &self.store.item, &self.store.field)
    }
}
