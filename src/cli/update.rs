//! Update command.

use crate::cli::output;
use crate::core::constants::UPDATE_DOCS_URL;
use crate::error::Result;

/// Point at the GAM update documentation.
pub fn execute() -> Result<i32> {
    output::header("Updating GAM");
    output::hint(&format!("see {}", output::path(UPDATE_DOCS_URL)));
    output::dimmed("after updating, run `gampass sync` to re-encrypt any new domains");
    Ok(0)
}
