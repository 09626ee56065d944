//! Setup command.
//!
//! Generates a key, encrypts every GAM secret with it, and walks the admin
//! through storing the key in 1Password.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::constants::KEY_MARKER_FILE;
use crate::core::lifecycle::{Lifecycle, SetupOutcome};
use crate::core::provider::KeyRef;
use crate::core::shell::{ShellWiring, WireOutcome};
use crate::error::Result;

/// Generate a key and encrypt all secrets under `dir`.
pub fn execute(dir: &Path, no_alias: bool) -> Result<i32> {
    info!(dir = %dir.display(), no_alias, "running setup");

    let mut lifecycle = Lifecycle::open(dir)?;
    let key_ref = lifecycle.config().key_ref();
    let wiring = if no_alias {
        None
    } else {
        Some(ShellWiring::from_config(lifecycle.config(), dir)?)
    };

    let result = lifecycle.setup(wiring.as_ref());
    lifecycle.finish();

    match result? {
        SetupOutcome::Provisioned {
            key,
            marker,
            report,
            wiring,
        } => {
            super::encrypt::print_report(&report);
            print_wiring(&wiring);
            print_instructions(&key_ref, &key.expose(), &marker);
        }
        SetupOutcome::AlreadyInitialized { marker } => {
            output::warn(&format!(
                "{} already exists, setup has already been run",
                KEY_MARKER_FILE
            ));
            output::kv("marker", output::path(marker.display()));
            output::hint(&format!(
                "store its key in 1Password, then run {}",
                output::cmd("gampass decrypt")
            ));
        }
        SetupOutcome::NothingToEncrypt => {
            super::encrypt::nothing_to_do(dir);
            output::hint("run gam to create oauth2.txt first");
        }
    }
    Ok(0)
}

fn print_wiring(wiring: &WireOutcome) {
    match wiring {
        WireOutcome::Added(path) => output::success(&format!(
            "added the gampass alias to {}",
            output::path(path.display())
        )),
        WireOutcome::AlreadyPresent(path) => output::dimmed(&format!(
            "gampass alias already present in {}",
            path.display()
        )),
        WireOutcome::Failed(reason) => {
            output::warn(&format!("could not add the shell alias: {}", reason))
        }
        WireOutcome::Disabled => {}
    }
}

fn print_instructions(key_ref: &KeyRef, key: &str, marker: &Path) {
    output::section("Store the key in 1Password");
    output::step(1, &format!("create a vault named {}", output::path(&key_ref.vault)));
    output::step(
        2,
        &format!(
            "add an item named {} with a {} field",
            output::path(&key_ref.item),
            output::path(&key_ref.field)
        ),
    );
    output::step(3, "paste this key into the field:");
    output::blank();
    output::data(key);
    output::blank();
    output::kv("reference", key_ref);
    output::kv("marker", output::path(marker.display()));
    output::blank();
    output::warn(&format!(
        "{} is deleted after the first successful decrypt; store the key before then",
        KEY_MARKER_FILE
    ));
    output::hint(&format!(
        "verify with {}",
        output::cmd("gampass decrypt")
    ));
}
