//! Status command.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::output;
use crate::core::lifecycle::{Lifecycle, LifecycleState};
use crate::core::locator::{SecretFile, SecretState};
use crate::error::Result;

#[derive(Serialize)]
struct StatusReport {
    state: LifecycleState,
    base_dir: PathBuf,
    provider: &'static str,
    key_ref: String,
    marker: bool,
    secrets: Vec<SecretEntry>,
    missing: Vec<String>,
}

#[derive(Serialize)]
struct SecretEntry {
    path: PathBuf,
    state: SecretState,
}

/// Show which secrets are encrypted. Never contacts the key store.
pub fn execute(dir: &Path, json: bool) -> Result<i32> {
    let lifecycle = Lifecycle::open(dir)?;
    let (state, secrets) = lifecycle.status()?;
    let report = StatusReport {
        state,
        base_dir: lifecycle.base_dir().to_path_buf(),
        provider: lifecycle.session().provider_name(),
        key_ref: lifecycle.session().key_ref().to_string(),
        marker: lifecycle.marker().exists(),
        secrets: secrets.iter().map(entry).collect(),
        missing: lifecycle.missing(),
    };
    lifecycle.finish();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(0)
}

fn entry(secret: &SecretFile) -> SecretEntry {
    SecretEntry {
        path: secret.plain_path(),
        state: secret.state,
    }
}

fn print_report(report: &StatusReport) {
    output::section("gampass status");
    output::kv("directory", output::path(report.base_dir.display()));
    output::kv("state", report.state);
    output::kv("key", format!("{} ({})", report.key_ref, report.provider));
    if report.marker {
        output::kv("marker", "gam.key present");
    }

    if report.secrets.is_empty() {
        output::blank();
        output::dimmed("no GAM secrets found");
        return;
    }

    output::section("Secrets");
    for secret in &report.secrets {
        let relative = secret
            .path
            .strip_prefix(&report.base_dir)
            .unwrap_or(&secret.path);
        output::list_item(&format!("{}  {}", relative.display(), secret.state));
    }

    if !report.missing.is_empty() {
        output::blank();
        output::dimmed(&format!("not present: {}", report.missing.join(", ")));
    }
}
