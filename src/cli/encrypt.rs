//! Encrypt command.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::lifecycle::{EncryptOutcome, Lifecycle, Report};
use crate::error::Result;

/// Encrypt every plaintext secret under `dir`.
///
/// Finding nothing to encrypt is reported, not treated as a failure.
pub fn execute(dir: &Path) -> Result<i32> {
    info!(dir = %dir.display(), "running encrypt");

    let mut lifecycle = Lifecycle::open(dir)?;
    let result = lifecycle.encrypt();
    lifecycle.finish();

    match result? {
        EncryptOutcome::Encrypted(report) => print_report(&report),
        EncryptOutcome::NothingToDo => nothing_to_do(dir),
    }
    Ok(0)
}

/// Summarize an encrypt run.
pub fn print_report(report: &Report) {
    if !report.encrypted.is_empty() {
        output::success(&format!(
            "encrypted {} for {}",
            output::count(report.encrypted.len(), "secret"),
            output::count(report.directories(), "Google Workspace domain")
        ));
    }
    if !report.reconciled.is_empty() {
        output::success(&format!(
            "removed {} left over from an interrupted run",
            output::count(report.reconciled.len(), "stale plaintext file")
        ));
    }
}

/// Report that there was nothing to encrypt.
pub fn nothing_to_do(dir: &Path) {
    output::warn(&format!(
        "no unencrypted secrets found in {}",
        output::path(dir.display())
    ));
}
