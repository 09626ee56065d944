//! gampass - keep GAM credential files encrypted at rest.

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gampass::cli::output;
use gampass::cli::{execute, normalize_args, print_help, Cli};
use gampass::core::constants::LOG_ENV;
use gampass::error::{ConfigError, Error, LifecycleError, ShellError};

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        // An unrecognized command shows the help text instead of failing.
        Err(e) if matches!(e.kind(), ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument) => {
            if let Err(e) = print_help() {
                output::error(&e.to_string());
                std::process::exit(1);
            }
            std::process::exit(0);
        }
        Err(e) => e.exit(),
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("gampass=debug")
        } else {
            EnvFilter::new("gampass=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli.command, cli.dir) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(&e.to_string());
            if let Some(hint) = suggestion(&e) {
                output::error_hint(hint);
            }
            std::process::exit(1);
        }
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    if e.is_decryption_failure() {
        return Some("check that the key in 1Password matches the one these files were encrypted with");
    }
    if e.is_secret_unavailable() {
        return Some("run: op signin");
    }
    match e {
        Error::Lifecycle(LifecycleError::NoEncryptedSecretsFound(_)) => Some("run: gampass setup"),
        Error::Lifecycle(LifecycleError::SecretsAlreadyEncrypted(_)) => Some("run: gampass sync"),
        Error::Config(ConfigError::BaseDirMissing(_)) => Some("pass --dir or set GAMPASS_DIR"),
        Error::Shell(ShellError::CommandNotFound(_)) => {
            Some("install GAM or set wrap.command in gampass.toml")
        }
        _ => None,
    }
}
