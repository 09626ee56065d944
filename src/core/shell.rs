//! Shell alias wiring.
//!
//! Adds a marked block to the user's shell rc file defining an alias that
//! runs the wrapped tool through `gampass run`. The block is only appended
//! when its opening marker is missing, so repeated setups leave a single
//! copy behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::constants::{SHELL_BLOCK_END, SHELL_BLOCK_START};
use crate::error::{ConfigError, Result, ShellError};

/// Result of a wiring attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireOutcome {
    Added(PathBuf),
    AlreadyPresent(PathBuf),
    /// Wiring was attempted and failed; setup carries on without it.
    Failed(String),
    Disabled,
}

/// Alias block for one base directory.
#[derive(Debug, Clone)]
pub struct ShellWiring {
    rc_path: PathBuf,
    alias: String,
    exe: PathBuf,
    base_dir: PathBuf,
}

impl ShellWiring {
    pub fn new(rc_path: PathBuf, alias: &str, exe: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            rc_path,
            alias: alias.to_string(),
            exe,
            base_dir,
        }
    }

    /// Wiring for the running executable, using the configured rc file or
    /// the one matching `$SHELL`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let rc_path = match &config.wrap.shell_rc {
            Some(path) => expand_home(path, &home),
            None => default_rc_path(std::env::var("SHELL").ok().as_deref(), &home),
        };
        let exe = std::env::current_exe()?;
        Ok(Self::new(
            rc_path,
            &config.wrap.alias,
            exe,
            base_dir.to_path_buf(),
        ))
    }

    pub fn rc_path(&self) -> &Path {
        &self.rc_path
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Text appended to the rc file.
    pub fn block(&self) -> Result<String> {
        let exe = quote(&self.exe)?;
        let base = quote(&self.base_dir)?;
        Ok(format!(
            "{start}\n\
             # decrypt GAM secrets, run the tool, re-encrypt when it exits\n\
             alias {alias}='{exe} --dir {base} run --'\n\
             alias {alias}_cli='{exe} --dir {base}'\n\
             {end}\n",
            start = SHELL_BLOCK_START,
            end = SHELL_BLOCK_END,
            alias = self.alias,
            exe = exe,
            base = base,
        ))
    }

    /// Whether the rc file already carries the block.
    pub fn is_wired(&self) -> Result<bool> {
        Ok(read_rc(&self.rc_path)?
            .lines()
            .any(|line| line.trim() == SHELL_BLOCK_START))
    }

    /// Append the block unless it is already there.
    pub fn wire(&self) -> Result<WireOutcome> {
        if self.is_wired()? {
            debug!(path = %self.rc_path.display(), "alias block already present");
            return Ok(WireOutcome::AlreadyPresent(self.rc_path.clone()));
        }

        let block = self.block()?;
        let existing = read_rc(&self.rc_path)?;
        let separator = if existing.is_empty() {
            ""
        } else if existing.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };

        let map_err = |source| ShellError::RcWrite {
            path: self.rc_path.clone(),
            source,
        };
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.rc_path)
            .map_err(map_err)?;
        file.write_all(format!("{}{}", separator, block).as_bytes())
            .map_err(map_err)?;

        info!(path = %self.rc_path.display(), alias = %self.alias, "alias block added");
        Ok(WireOutcome::Added(self.rc_path.clone()))
    }

    /// Remove the block. Returns whether anything was removed.
    pub fn unwire(&self) -> Result<bool> {
        let existing = read_rc(&self.rc_path)?;
        let mut kept = Vec::new();
        let mut inside = false;
        let mut removed = false;

        for line in existing.lines() {
            match line.trim() {
                SHELL_BLOCK_START => {
                    inside = true;
                    removed = true;
                    // Drop the blank separator written before the block.
                    if kept.last().is_some_and(|l: &&str| l.trim().is_empty()) {
                        kept.pop();
                    }
                }
                SHELL_BLOCK_END if inside => inside = false,
                _ if inside => {}
                _ => kept.push(line),
            }
        }

        if !removed {
            return Ok(false);
        }

        let mut contents = kept.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.rc_path, contents).map_err(|source| ShellError::RcWrite {
            path: self.rc_path.clone(),
            source,
        })?;

        info!(path = %self.rc_path.display(), "alias block removed");
        Ok(true)
    }
}

/// Startup file for a login shell path such as `/bin/zsh`.
pub fn default_rc_path(shell: Option<&str>, home: &Path) -> PathBuf {
    let name = shell
        .and_then(|s| Path::new(s).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("zsh");
    match name {
        "zsh" => home.join(".zshrc"),
        "bash" => home.join(".bashrc"),
        _ => home.join(".profile"),
    }
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

fn read_rc(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(ShellError::RcWrite {
            path: path.to_path_buf(),
            source,
        }
        .into()),
    }
}

/// Double-quote a path for use inside a single-quoted alias body.
fn quote(path: &Path) -> Result<String> {
    let text = path
        .to_str()
        .ok_or_else(|| ShellError::UnsafePath(path.to_path_buf()))?;
    if text.chars().any(|c| matches!(c, '\'' | '"' | '$' | '`' | '\\' | '\n')) {
        return Err(ShellError::UnsafePath(path.to_path_buf()).into());
    }
    Ok(format!("\"{}\"", text))
}
