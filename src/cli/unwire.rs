//! Unwire command.

use std::path::Path;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::shell::ShellWiring;
use crate::error::Result;

/// Remove the alias block from the shell rc file.
pub fn execute(dir: &Path) -> Result<i32> {
    let config = Config::load(dir)?;
    let wiring = ShellWiring::from_config(&config, dir)?;

    if wiring.unwire()? {
        output::success(&format!(
            "removed the {} alias from {}",
            wiring.alias(),
            output::path(wiring.rc_path().display())
        ));
        output::hint("open a new shell for the change to take effect");
    } else {
        output::dimmed(&format!(
            "no gampass alias in {}",
            wiring.rc_path().display()
        ));
    }
    Ok(0)
}
