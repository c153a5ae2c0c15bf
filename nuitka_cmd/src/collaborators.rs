//! External services the session talks to: path pickers and the clipboard.
//!
//! Front-ends supply their own [`PathPicker`]; the binary only needs a
//! clipboard, provided by [`SystemClipboard`], which pipes text into the
//! platform's clipboard command.

use std::io::Write;
use std::process::{Command, Stdio};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::ClipboardError;

/// File-type filter offered to a file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable label.
    pub label: &'static str,
    /// Glob pattern of accepted files.
    pub pattern: &'static str,
}

impl FileFilter {
    /// Python sources.
    pub const PYTHON: Self = Self {
        label: "Python",
        pattern: "*.py",
    };
    /// Windows icons.
    pub const ICON: Self = Self {
        label: "ICO",
        pattern: "*.ico",
    };
    /// PNG images.
    pub const PNG: Self = Self {
        label: "PNG",
        pattern: "*.png",
    };
}

/// Modal path selection provided by the host front-end.
///
/// Both methods return `None` when the user cancels.
pub trait PathPicker {
    /// Asks the user for an existing file matching `filter`.
    fn pick_file(&mut self, filter: &FileFilter) -> Option<Utf8PathBuf>;
    /// Asks the user for a directory.
    fn pick_directory(&mut self) -> Option<Utf8PathBuf>;
}

/// Receives generated text for the system clipboard.
pub trait ClipboardSink {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClipboardError`] when the clipboard cannot be written.
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by an external command reading from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    /// Uses `program` with `args` as the clipboard command.
    #[must_use]
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Picks the conventional clipboard command for the host platform.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", Vec::<String>::new())
        } else if cfg!(windows) {
            Self::new("clip", Vec::<String>::new())
        } else {
            Self::new("xclip", ["-selection", "clipboard"])
        }
    }

    /// Returns the program that will be spawned.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        debug!(program = %self.program, "copying command to clipboard");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));
        let status = child.wait().map_err(ClipboardError::Write)?;
        written.map_err(ClipboardError::Write)?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Exit {
                program: self.program.clone(),
                status,
            })
        }
    }
}

/// Lexically normalises a picked path.
///
/// Collapses `.` segments, repeated separators, and `..` segments that follow
/// a normal component. Nothing touches the filesystem.
///
/// # Examples
///
/// ```
/// use nuitka_cmd::collaborators::normalise_path;
///
/// assert_eq!(normalise_path("src/./app/../main.py"), "src/main.py");
/// assert_eq!(normalise_path("../shared//icon.ico"), "../shared/icon.ico");
/// ```
#[must_use]
pub fn normalise_path(raw: impl AsRef<Utf8Path>) -> String {
    let mut parts: Vec<Utf8Component<'_>> = Vec::new();
    for component in raw.as_ref().components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last().copied() {
                Some(Utf8Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return String::from(".");
    }
    parts
        .iter()
        .map(|component| component.as_str())
        .collect::<Utf8PathBuf>()
        .into_string()
}
