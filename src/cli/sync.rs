//! Sync command.
//!
//! Decrypts every domain and re-encrypts with the key already in 1Password,
//! picking up domains added since the last setup.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::lifecycle::{EncryptOutcome, Lifecycle};
use crate::error::Result;

/// Decrypt then re-encrypt everything under `dir`.
pub fn execute(dir: &Path) -> Result<i32> {
    info!(dir = %dir.display(), "running sync");

    let mut lifecycle = Lifecycle::open(dir)?;
    let result = lifecycle.sync();
    lifecycle.finish();
    let outcome = result?;

    super::decrypt::print_report(&outcome.decrypted);
    match &outcome.encrypted {
        EncryptOutcome::Encrypted(report) => super::encrypt::print_report(report),
        // Every decrypted file was skipped, nothing came back as plaintext.
        EncryptOutcome::NothingToDo => super::encrypt::nothing_to_do(dir),
    }
    output::success("all GAM secrets are encrypted with the 1Password key");
    Ok(0)
}
