//! Constants used throughout gampass.
//!
//! Centralizes magic strings and default configuration values.

/// Credential files GAM writes that must stay encrypted at rest.
pub const SECRET_NAMES: &[&str] = &["oauth2.txt", "oauth2service.json", "client_secrets.json"];

/// Suffix marking the encrypted form of a secret file.
pub const ENCRYPTED_SUFFIX: &str = ".encrypted";

/// One-time key marker written by `setup` (`<base>/gam.key`).
pub const KEY_MARKER_FILE: &str = "gam.key";

/// Optional configuration file in the base directory.
pub const CONFIG_FILE: &str = "gampass.toml";

/// Default 1Password vault holding the key.
pub const DEFAULT_VAULT: &str = "gampass";

/// Default 1Password item holding the key.
pub const DEFAULT_ITEM: &str = "gamkey";

/// Default field of the item holding the key.
pub const DEFAULT_FIELD: &str = "password";

/// Environment variable read by the `env` key provider.
pub const DEFAULT_KEY_ENV: &str = "GAMPASS_KEY";

/// Overrides `[store] provider` from the config file.
pub const PROVIDER_ENV: &str = "GAMPASS_PROVIDER";

/// Log filter environment variable.
pub const LOG_ENV: &str = "GAMPASS_LOG";

/// Default wrapped administrative tool.
pub const DEFAULT_WRAPPED_COMMAND: &str = "gam";

/// Default alias name installed into the shell rc file.
pub const DEFAULT_ALIAS: &str = "gampass";

/// Opening line of the block appended to the shell rc file.
pub const SHELL_BLOCK_START: &str = "# >>> gampass >>>";

/// Closing line of the block appended to the shell rc file.
pub const SHELL_BLOCK_END: &str = "# <<< gampass <<<";

/// Where GAM update instructions live.
pub const UPDATE_DOCS_URL: &str = "https://github.com/taers232c/GAMADV-XTD3/wiki/GamUpdates";
