//! Error types for `nuitka_cmd`.
//!
//! The command builder has a single user-facing failure. Everything else the
//! binary can hit comes from loading configuration layers or writing output,
//! and is wrapped by [`NuitkaCmdError`] so `main` can report it in one place.
use std::io;
use std::sync::Arc;

use ortho_config::OrthoError;
use thiserror::Error;

/// Failures raised while turning options into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The entry script field is empty.
    #[error("entry script is missing")]
    MissingEntryScript,
}

/// Failures raised while handing text to the clipboard command.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The clipboard program could not be started.
    #[error("failed to start clipboard command `{program}`: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing to the clipboard program's stdin failed.
    #[error("failed to write to clipboard command: {0}")]
    Write(#[source] io::Error),
    /// The clipboard program exited unsuccessfully.
    #[error("clipboard command `{program}` exited with {status}")]
    Exit {
        /// Program that failed.
        program: String,
        /// Exit status reported by the OS.
        status: std::process::ExitStatus,
    },
}

/// Errors raised by the `nuitka-cmd` binary.
#[derive(Debug, Error)]
pub enum NuitkaCmdError {
    /// Wraps discovery, parsing, and merge failures from `ortho_config`.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<OrthoError>),
    /// The command could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Writing the generated command failed.
    #[error("failed to write command: {0}")]
    Output(#[from] io::Error),
}

/// Convenient result alias for the binary's fallible operations.
pub type Result<T, E = NuitkaCmdError> = std::result::Result<T, E>;
