//! Application controller owning the single live option model.
//!
//! A [`Session`] mirrors one interactive sitting: edits flow into the
//! [`OptionModel`], `generate` refreshes the output surface, and external
//! collaborators are consulted for paths and the clipboard.

use tracing::{debug, info};

use crate::collaborators::{ClipboardSink, FileFilter, PathPicker, normalise_path};
use crate::command::build_command;
use crate::error::{BuildError, ClipboardError};
use crate::model::{Edit, OptionModel, TextField};

/// Path fields that can be filled from a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathTarget {
    /// Entry script (`*.py`).
    Script,
    /// Output directory.
    OutputDir,
    /// Executable icon (`*.ico`).
    Icon,
    /// Onefile splash image (`*.png`).
    Splash,
}

impl PathTarget {
    const fn field(self) -> TextField {
        match self {
            Self::Script => TextField::Script,
            Self::OutputDir => TextField::OutputDir,
            Self::Icon => TextField::Icon,
            Self::Splash => TextField::Splash,
        }
    }

    const fn filter(self) -> Option<FileFilter> {
        match self {
            Self::Script => Some(FileFilter::PYTHON),
            Self::OutputDir => None,
            Self::Icon => Some(FileFilter::ICON),
            Self::Splash => Some(FileFilter::PNG),
        }
    }
}

/// Option model plus the generated-output surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    model: OptionModel,
    output: String,
}

impl Session {
    /// Starts a session around `model` with an empty output surface.
    #[must_use]
    pub const fn new(model: OptionModel) -> Self {
        Self {
            model,
            output: String::new(),
        }
    }

    /// Read-only view of the option model.
    #[must_use]
    pub const fn model(&self) -> &OptionModel {
        &self.model
    }

    /// Mutable access for callers that batch edits themselves.
    pub const fn model_mut(&mut self) -> &mut OptionModel {
        &mut self.model
    }

    /// Applies one edit through the option model.
    pub fn apply(&mut self, edit: Edit) {
        self.model.apply(edit);
    }

    /// Text currently shown on the output surface.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Builds the command and replaces the output surface with it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingEntryScript`] when no entry script is
    /// set. The output surface keeps its previous contents.
    pub fn generate(&mut self) -> Result<&str, BuildError> {
        let command = build_command(self.model.config())?;
        self.output = command.render();
        info!("output surface refreshed");
        Ok(&self.output)
    }

    /// Copies the trimmed output surface to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates the sink's [`ClipboardError`].
    pub fn copy_output(&self, sink: &dyn ClipboardSink) -> Result<(), ClipboardError> {
        sink.copy(self.output.trim())
    }

    /// Fills `target` from `picker`, leaving it unchanged on cancel.
    ///
    /// Returns whether a path was written.
    pub fn browse(&mut self, target: PathTarget, picker: &mut dyn PathPicker) -> bool {
        let picked = match target.filter() {
            Some(filter) => picker.pick_file(&filter),
            None => picker.pick_directory(),
        };
        let Some(path) = picked else {
            debug!(?target, "path selection cancelled");
            return false;
        };
        self.apply(Edit::Text(target.field(), normalise_path(&path)));
        true
    }
}
