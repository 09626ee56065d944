//! Run command.
//!
//! Decrypts the secrets, runs the wrapped tool with the given arguments, and
//! encrypts again once it exits.

use std::path::Path;

use tracing::{debug, info};

use crate::core::lifecycle::Lifecycle;
use crate::error::Result;

/// Run the wrapped tool with `args`. Returns the tool's exit code.
pub fn execute(dir: &Path, args: &[String]) -> Result<i32> {
    info!(dir = %dir.display(), args = args.len(), "running wrapped command");

    let mut lifecycle = Lifecycle::open(dir)?;
    let result = lifecycle.run(args);
    lifecycle.finish();
    let outcome = result?;

    debug!(
        decrypted = outcome.decrypted.changed(),
        exit_code = outcome.exit_code,
        "wrapped run complete"
    );
    Ok(outcome.exit_code)
}
