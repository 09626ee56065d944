//! gampass - keeps GAM credential files encrypted at rest.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── setup         # Generate a key and encrypt (alias: generate)
//! │   ├── encrypt       # Encrypt plaintext secrets
//! │   ├── decrypt       # Decrypt encrypted secrets
//! │   ├── sync          # Decrypt, then re-encrypt with the stored key
//! │   ├── run           # Decrypt, run gam, re-encrypt
//! │   ├── status        # Show what is on disk
//! │   ├── unwire        # Remove the shell alias block
//! │   ├── update        # Point at the GAM update docs
//! │   ├── completions   # Shell completion scripts
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # gampass.toml management
//!     ├── locator       # Secret file discovery
//!     ├── cipher/       # age encryption and key material
//!     ├── provider/     # Key retrieval (1Password, env)
//!     ├── transform     # Atomic per-file encrypt/decrypt
//!     ├── marker        # One-time gam.key marker
//!     ├── lifecycle     # Operation orchestration
//!     ├── runner        # Wrapped command execution
//!     └── shell         # Shell alias wiring
//! ```
//!
//! # Workflow
//!
//! 1. `gampass setup` generates a key, writes it to `gam.key`, encrypts the
//!    secrets, and prints instructions for storing the key in 1Password.
//! 2. `gampass decrypt` fetches the key from 1Password, decrypts the
//!    secrets, and deletes `gam.key`.
//! 3. `gampass run -- <gam args>` does decrypt → gam → encrypt in one go.

pub mod cli;
pub mod core;
pub mod error;
