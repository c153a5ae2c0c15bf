//! Shared fixtures and utilities for CLI behaviour tests.

use crate::cli::Cli;
use anyhow::{Context, Result, anyhow};
use ortho_config::figment;

pub fn parse_command_line(args: &[&str]) -> Result<Cli> {
    let mut full_args = Vec::with_capacity(args.len() + 1);
    full_args.push("nuitka-cmd");
    full_args.extend_from_slice(args);
    Cli::try_parse_ordered_from(full_args).context("parse command line")
}

pub fn figment_error<E: ToString>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}

pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Clears the environment and points the home and XDG directories at the
/// jail, so user-level configuration files on the host are never discovered.
pub fn isolate_env(jail: &mut figment::Jail) {
    jail.clear_env();
    let root = jail.directory().to_path_buf();
    jail.set_env("HOME", root.display());
    jail.set_env("XDG_CONFIG_HOME", root.join(".config").display());
}
