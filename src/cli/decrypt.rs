//! Decrypt command.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::constants::KEY_MARKER_FILE;
use crate::core::lifecycle::{Lifecycle, Report};
use crate::error::Result;

/// Decrypt every encrypted secret under `dir`.
pub fn execute(dir: &Path) -> Result<i32> {
    info!(dir = %dir.display(), "running decrypt");

    let mut lifecycle = Lifecycle::open(dir)?;
    output::dimmed(&format!(
        "decrypting GAM secrets via {}",
        lifecycle.session().provider_name()
    ));
    let result = lifecycle.decrypt();
    lifecycle.finish();

    print_report(&result?);
    Ok(0)
}

/// Summarize a decrypt run.
pub fn print_report(report: &Report) {
    let changed = report.decrypted.len() + report.reconciled.len();
    if changed > 0 {
        output::success(&format!(
            "decrypted {} for {}",
            output::count(changed, "secret"),
            output::count(report.directories(), "Google Workspace domain")
        ));
    }
    if !report.skipped.is_empty() {
        output::warn("plaintext and encrypted copies differ, left both in place:");
        for path in &report.skipped {
            output::list_item(&path.display().to_string());
        }
        output::hint(&format!(
            "run {} to keep the plaintext version",
            output::cmd("gampass encrypt")
        ));
    }
    if report.marker_removed {
        output::dimmed(&format!("removed {}", KEY_MARKER_FILE));
    }
}
