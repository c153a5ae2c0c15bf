//! Option Model: the live [`BuildConfig`] plus its derived-state rules.
//!
//! Every mutation goes through [`OptionModel::apply`], which writes exactly
//! one field and then re-evaluates the rules over the whole configuration.
//! The rules never reject an edit; the only correction they make is the
//! last-write-wins exclusion between the two forced compilers.

use tracing::debug;

use crate::options::{BuildConfig, BuildMode, ConsoleMode, KnownPlugin, LtoMode};

/// Free-text fields of [`BuildConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    /// Interpreter used in the invocation prefix.
    Python,
    /// Entry script.
    Script,
    /// Output directory.
    OutputDir,
    /// Output file name.
    OutputFilename,
    /// Executable icon.
    Icon,
    /// Onefile splash image.
    Splash,
    /// Company name resource.
    CompanyName,
    /// Product name resource.
    ProductName,
    /// Copyright resource.
    Copyright,
    /// Trademarks resource.
    Trademarks,
    /// File description resource.
    FileDescription,
    /// File version resource.
    FileVersion,
    /// Product version resource.
    ProductVersion,
    /// Custom job count.
    Jobs,
    /// Packages to follow.
    FollowImportTo,
    /// Packages not to follow.
    NofollowImportTo,
    /// Standard output target.
    StdoutSpec,
    /// Standard error target.
    StderrSpec,
    /// Additional plugin names.
    CustomPlugins,
    /// Plugins to disable.
    DisabledPlugins,
    /// User plugin files.
    UserPlugins,
    /// Package data to include.
    IncludePackageData,
    /// Data files to include.
    IncludeDataFiles,
    /// Data directories to include.
    IncludeDataDir,
    /// Packages to force-include.
    IncludePackage,
    /// Data file patterns to exclude.
    NoincludeDataFiles,
}

impl TextField {
    fn slot(self, config: &mut BuildConfig) -> &mut String {
        match self {
            Self::Python => &mut config.python,
            Self::Script => &mut config.script,
            Self::OutputDir => &mut config.output_dir,
            Self::OutputFilename => &mut config.output_filename,
            Self::Icon => &mut config.icon,
            Self::Splash => &mut config.splash,
            Self::CompanyName => &mut config.company_name,
            Self::ProductName => &mut config.product_name,
            Self::Copyright => &mut config.copyright,
            Self::Trademarks => &mut config.trademarks,
            Self::FileDescription => &mut config.file_description,
            Self::FileVersion => &mut config.file_version,
            Self::ProductVersion => &mut config.product_version,
            Self::Jobs => &mut config.jobs,
            Self::FollowImportTo => &mut config.follow_import_to,
            Self::NofollowImportTo => &mut config.nofollow_import_to,
            Self::StdoutSpec => &mut config.stdout_spec,
            Self::StderrSpec => &mut config.stderr_spec,
            Self::CustomPlugins => &mut config.custom_plugins,
            Self::DisabledPlugins => &mut config.disabled_plugins,
            Self::UserPlugins => &mut config.user_plugins,
            Self::IncludePackageData => &mut config.include_package_data,
            Self::IncludeDataFiles => &mut config.include_data_files,
            Self::IncludeDataDir => &mut config.include_data_dir,
            Self::IncludePackage => &mut config.include_package,
            Self::NoincludeDataFiles => &mut config.noinclude_data_files,
        }
    }
}

/// Boolean fields of [`BuildConfig`], excluding plugin toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleField {
    /// `--standalone`.
    Standalone,
    /// `--onefile`.
    Onefile,
    /// `--remove-output`.
    RemoveOutput,
    /// `--windows-uac-admin`.
    UacAdmin,
    /// Enables the custom job count.
    UseJobs,
    /// `--clang`.
    Clang,
    /// `--mingw64`.
    Mingw64,
    /// Static C++ runtime toggle.
    StaticLink,
    /// `--follow-imports`.
    FollowImports,
    /// `--follow-stdlib`.
    FollowStdlib,
}

impl ToggleField {
    fn slot(self, config: &mut BuildConfig) -> &mut bool {
        match self {
            Self::Standalone => &mut config.standalone,
            Self::Onefile => &mut config.onefile,
            Self::RemoveOutput => &mut config.remove_output,
            Self::UacAdmin => &mut config.uac_admin,
            Self::UseJobs => &mut config.use_jobs,
            Self::Clang => &mut config.clang,
            Self::Mingw64 => &mut config.mingw64,
            Self::StaticLink => &mut config.static_link,
            Self::FollowImports => &mut config.follow_imports,
            Self::FollowStdlib => &mut config.follow_stdlib,
        }
    }

    const fn compiler(self) -> Option<CompilerToggle> {
        match self {
            Self::Clang => Some(CompilerToggle::Clang),
            Self::Mingw64 => Some(CompilerToggle::Mingw64),
            _ => None,
        }
    }
}

/// The two mutually exclusive forced-compiler toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerToggle {
    /// Force Clang.
    Clang,
    /// Force MinGW64.
    Mingw64,
}

/// One user edit of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace a free-text field.
    Text(TextField, String),
    /// Set a boolean field.
    Toggle(ToggleField, bool),
    /// Select the build mode.
    Mode(BuildMode),
    /// Select the console mode.
    ConsoleMode(ConsoleMode),
    /// Select the LTO setting.
    Lto(LtoMode),
    /// Toggle a known plugin.
    Plugin(KnownPlugin, bool),
}

/// Which groups of inputs are worth offering for the current configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enablement {
    /// Standalone, onefile, UAC, console and icon/splash inputs.
    pub executable_options: bool,
    /// The job count entry.
    pub job_count_entry: bool,
}

/// Reports whether executable-only options apply to `mode`.
#[must_use]
pub const fn is_executable_relevant(mode: BuildMode) -> bool {
    !matches!(mode, BuildMode::ExtensionModule)
}

impl BuildConfig {
    /// Clears the compiler toggle that was not just written when both are set.
    pub fn mutual_exclusion_update(&mut self, changed: CompilerToggle) {
        if !(self.clang && self.mingw64) {
            return;
        }
        match changed {
            CompilerToggle::Clang => self.mingw64 = false,
            CompilerToggle::Mingw64 => self.clang = false,
        }
        debug!(?changed, "cleared the competing compiler toggle");
    }
}

/// Owner of the single live [`BuildConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionModel {
    config: BuildConfig,
}

impl OptionModel {
    /// Wraps a loaded configuration.
    ///
    /// A snapshot with both compilers forced resolves as though `mingw64`
    /// were written last.
    #[must_use]
    pub fn new(mut config: BuildConfig) -> Self {
        config.mutual_exclusion_update(CompilerToggle::Mingw64);
        Self { config }
    }

    /// Read-only view of the current configuration.
    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Consumes the model, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> BuildConfig {
        self.config
    }

    /// Writes one field and re-evaluates the derived-state rules.
    pub fn apply(&mut self, edit: Edit) {
        debug!(?edit, "applying edit");
        match &edit {
            Edit::Text(field, value) => value.clone_into(field.slot(&mut self.config)),
            Edit::Toggle(field, value) => *field.slot(&mut self.config) = *value,
            Edit::Mode(mode) => self.config.mode = *mode,
            Edit::ConsoleMode(mode) => self.config.console_mode = *mode,
            Edit::Lto(lto) => self.config.lto = *lto,
            Edit::Plugin(plugin, enabled) => self.config.set_plugin(*plugin, *enabled),
        }
        self.on_field_changed(&edit);
    }

    /// Applies a batch of edits in order.
    pub fn apply_all<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = Edit>,
    {
        for edit in edits {
            self.apply(edit);
        }
    }

    fn on_field_changed(&mut self, edit: &Edit) {
        if let Edit::Toggle(field, true) = edit
            && let Some(compiler) = field.compiler()
        {
            self.config.mutual_exclusion_update(compiler);
        }
    }

    /// Derives which inputs are meaningful for the current configuration.
    #[must_use]
    pub const fn enablement(&self) -> Enablement {
        Enablement {
            executable_options: is_executable_relevant(self.config.mode),
            job_count_entry: self.config.use_jobs,
        }
    }
}
