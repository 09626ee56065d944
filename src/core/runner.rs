//! Wrapped command execution.
//!
//! Runs the administrative tool as a child process and waits for it, so
//! re-encryption starts exactly when the tool exits.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Result, ShellError};

/// Signals a terminal sends to the whole foreground process group.
#[cfg(unix)]
const SHIELDED: [libc::c_int; 4] = [libc::SIGINT, libc::SIGQUIT, libc::SIGTERM, libc::SIGHUP];

/// Ignores terminal signals in this process until dropped.
///
/// Ctrl-C reaches gampass as well as the wrapped tool. While a shield is up
/// only the tool reacts to it, and gampass lives on to re-encrypt. Commands
/// started through [`run`] get the default dispositions back.
pub struct SignalShield {
    #[cfg(unix)]
    previous: [(libc::c_int, libc::sighandler_t); 4],
}

impl SignalShield {
    #[cfg(unix)]
    pub fn raise() -> Self {
        let previous = SHIELDED.map(|sig| {
            // SAFETY: SIG_IGN installs no handler code.
            let prev = unsafe { libc::signal(sig, libc::SIG_IGN) };
            (sig, prev)
        });
        debug!("ignoring terminal signals until the wrapped command exits");
        Self { previous }
    }

    #[cfg(not(unix))]
    pub fn raise() -> Self {
        Self {}
    }

    #[cfg(unix)]
    fn release_child(&self, command: &mut Command) {
        use std::os::unix::process::CommandExt;

        // SAFETY: the hook only calls signal(2), which is async-signal-safe.
        unsafe {
            command.pre_exec(|| {
                for sig in SHIELDED {
                    libc::signal(sig, libc::SIG_DFL);
                }
                Ok(())
            });
        }
    }

    #[cfg(not(unix))]
    fn release_child(&self, _command: &mut Command) {}
}

impl Drop for SignalShield {
    fn drop(&mut self) {
        #[cfg(unix)]
        for (sig, prev) in self.previous {
            if prev != libc::SIG_ERR {
                // SAFETY: restores a disposition previously returned by signal(2).
                unsafe {
                    libc::signal(sig, prev);
                }
            }
        }
    }
}

/// Locate `program` on `PATH`.
pub fn resolve(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| ShellError::CommandNotFound(program.to_string()).into())
}

/// Run the resolved `program` with `args`, inheriting stdio, and return its
/// exit code.
///
/// A child killed by a signal reports `128 + signal` on Unix and 1 elsewhere.
pub fn run(program: &Path, args: &[String], shield: &SignalShield) -> Result<i32> {
    info!(program = %program.display(), args = args.len(), "running wrapped command");
    let mut command = Command::new(program);
    command.args(args);
    shield.release_child(&mut command);

    let status = command.status().map_err(|source| ShellError::Spawn {
        command: program.display().to_string(),
        source,
    })?;

    let code = exit_code(&status);
    debug!(code, "wrapped command exited");
    Ok(code)
}

#[cfg(unix)]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|s| 128 + s))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
