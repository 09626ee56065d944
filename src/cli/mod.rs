//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod output;
pub mod run;
pub mod setup;
pub mod status;
pub mod sync;
pub mod update;
pub mod unwire;

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use crate::error::{ConfigError, Result};

/// gampass - keep GAM secrets encrypted at rest.
#[derive(Parser, Debug)]
#[command(
    name = "gampass",
    about = "Keep GAM credential files encrypted at rest with a key stored in 1Password",
    version,
    disable_help_subcommand = true,
    after_help = "Example:\n  gampass sync"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// GAM directory holding the secret files (default: current directory)
    #[arg(long, global = true, env = "GAMPASS_DIR", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a key and encrypt all GAM secrets
    #[command(visible_alias = "generate")]
    Setup {
        /// Do not add the shell alias
        #[arg(long)]
        no_alias: bool,
    },

    /// Encrypt all GAM secrets
    Encrypt,

    /// Decrypt all GAM secrets
    Decrypt,

    /// Decrypt, then encrypt every domain with the existing 1Password key
    Sync,

    /// Decrypt, run gam with the given arguments, then encrypt again
    Run {
        /// Arguments passed to the wrapped command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show which secrets are encrypted
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View GAM update documentation
    #[command(visible_alias = "updates")]
    Update,

    /// Remove the shell alias block
    Unwire,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Lower-case the subcommand name so `Decrypt` and `DECRYPT` work too.
///
/// Only the first positional argument is touched, and only when it matches
/// a known command or alias case-insensitively.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let known: Vec<String> = Cli::command()
        .get_subcommands()
        .flat_map(|sub| {
            std::iter::once(sub.get_name().to_string())
                .chain(sub.get_all_aliases().map(str::to_string))
        })
        .collect();

    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut skip_value = false;
    for arg in args.iter_mut().skip(1) {
        if skip_value {
            skip_value = false;
            continue;
        }
        let Some(text) = arg.to_str() else { break };
        if text == "--dir" {
            skip_value = true;
            continue;
        }
        if text.starts_with('-') {
            continue;
        }
        let lowered = text.to_ascii_lowercase();
        if known.iter().any(|k| *k == lowered) {
            *arg = OsString::from(lowered);
        }
        break;
    }
    args
}

/// Resolve the base directory from `--dir`/`GAMPASS_DIR` or the current directory.
pub fn base_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        return Err(ConfigError::BaseDirMissing(dir).into());
    }
    Ok(std::fs::canonicalize(&dir)?)
}

/// Print the help text to stdout.
pub fn print_help() -> Result<()> {
    Cli::command().print_help()?;
    writeln!(std::io::stdout())?;
    Ok(())
}

/// Execute a command. Returns the process exit code.
pub fn execute(command: Option<Command>, dir: Option<PathBuf>) -> Result<i32> {
    use Command::*;

    let Some(command) = command else {
        print_help()?;
        return Ok(0);
    };

    match command {
        Setup { no_alias } => setup::execute(&base_dir(dir)?, no_alias),
        Encrypt => encrypt::execute(&base_dir(dir)?),
        Decrypt => decrypt::execute(&base_dir(dir)?),
        Sync => sync::execute(&base_dir(dir)?),
        Run { args } => run::execute(&base_dir(dir)?, &args),
        Status { json } => status::execute(&base_dir(dir)?, json),
        Unwire => unwire::execute(&base_dir(dir)?),
        Update => update::execute(),
        Completions { shell } => completions::execute(shell),
    }
}
