//! Command-line surface for the `nuitka-cmd` binary.
//!
//! Every form field of the option model is a long flag. Flags only carry
//! values the user actually typed; [`OptionArgs::into_edits`] turns them into
//! [`Edit`] events that are replayed over the configuration loaded from the
//! default, file, and environment layers.
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser};

use crate::model::{Edit, TextField, ToggleField};
use crate::options::{BuildMode, ConsoleMode, KnownPlugin, LtoMode};

mod config_loading;
mod discovery;

pub use config_loading::{ENV_PREFIX, load_build_config};
pub use discovery::{CONFIG_PATH_ENV, LOCAL_CONFIG_FILE};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "nuitka-cmd",
    bin_name = "nuitka-cmd",
    about = "Assemble a Nuitka compiler invocation from layered build options",
    version
)]
pub struct Cli {
    /// Overrides configuration discovery with an explicit file path.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        help = "Path to the configuration file"
    )]
    pub config_path: Option<PathBuf>,
    /// Also copy the generated command to the system clipboard.
    #[arg(long)]
    pub copy: bool,
    /// Option values typed on the command line.
    #[command(flatten)]
    pub options: OptionArgs,
}

/// Per-field overrides. `None` leaves the loaded value untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct OptionArgs {
    /// Interpreter used to run `-m nuitka`.
    #[arg(long, value_name = "PROGRAM")]
    pub python: Option<String>,
    /// Entry script to compile.
    #[arg(long, value_name = "FILE")]
    pub script: Option<String>,
    /// Directory receiving the build output.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,
    /// File name of the produced binary.
    #[arg(long, value_name = "NAME")]
    pub output_filename: Option<String>,

    /// Kind of artefact to build.
    #[arg(long, value_enum)]
    pub mode: Option<BuildMode>,
    /// Bundle the interpreter and dependencies.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub standalone: Option<bool>,
    /// Pack the output into a single file.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub onefile: Option<bool>,
    /// Delete the build folder after compiling.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub remove_output: Option<bool>,
    /// Request elevation when the executable starts.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub uac_admin: Option<bool>,
    /// Console behaviour of the executable.
    #[arg(long, value_enum)]
    pub console_mode: Option<ConsoleMode>,
    /// Icon embedded in the executable.
    #[arg(long, value_name = "FILE")]
    pub icon: Option<String>,
    /// Splash image shown while a onefile build unpacks.
    #[arg(long, value_name = "FILE")]
    pub splash: Option<String>,

    /// Company name resource.
    #[arg(long, value_name = "TEXT")]
    pub company_name: Option<String>,
    /// Product name resource.
    #[arg(long, value_name = "TEXT")]
    pub product_name: Option<String>,
    /// Copyright notice resource.
    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,
    /// Trademarks resource.
    #[arg(long, value_name = "TEXT")]
    pub trademarks: Option<String>,
    /// File description resource.
    #[arg(long, value_name = "TEXT")]
    pub file_description: Option<String>,
    /// File version resource.
    #[arg(long, value_name = "VERSION")]
    pub file_version: Option<String>,
    /// Product version resource.
    #[arg(long, value_name = "VERSION")]
    pub product_version: Option<String>,

    /// Pass an explicit job count.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub use_jobs: Option<bool>,
    /// Job count used when `--use-jobs` is on.
    #[arg(long, value_name = "N")]
    pub jobs: Option<String>,
    /// Link-time optimisation.
    #[arg(long, value_enum)]
    pub lto: Option<LtoMode>,
    /// Force the clang backend.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub clang: Option<bool>,
    /// Force the `MinGW64` backend.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub mingw64: Option<bool>,
    /// Static libpython toggle.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub static_link: Option<bool>,

    /// Follow all imports.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub follow_imports: Option<bool>,
    /// Follow standard library imports.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub follow_stdlib: Option<bool>,
    /// Modules or packages to follow.
    #[arg(long, value_name = "LIST")]
    pub follow_import_to: Option<String>,
    /// Modules or packages not to follow.
    #[arg(long, value_name = "LIST")]
    pub nofollow_import_to: Option<String>,
    /// Redirect target for stdout.
    #[arg(long, value_name = "SPEC")]
    pub stdout_spec: Option<String>,
    /// Redirect target for stderr.
    #[arg(long, value_name = "SPEC")]
    pub stderr_spec: Option<String>,

    /// Enable a known plugin. Repeatable.
    #[arg(long = "plugin", value_enum, value_name = "PLUGIN")]
    pub plugins: Vec<KnownPlugin>,
    /// Disable a known plugin enabled by a lower layer. Repeatable.
    #[arg(long = "no-plugin", value_enum, value_name = "PLUGIN")]
    pub no_plugins: Vec<KnownPlugin>,
    /// Comma-separated extra plugins to enable.
    #[arg(long, value_name = "LIST")]
    pub custom_plugins: Option<String>,
    /// Comma-separated plugins to disable.
    #[arg(long, value_name = "LIST")]
    pub disabled_plugins: Option<String>,
    /// Comma-separated user plugin files.
    #[arg(long, value_name = "LIST")]
    pub user_plugins: Option<String>,

    /// Comma-separated package data entries.
    #[arg(long, value_name = "LIST")]
    pub include_package_data: Option<String>,
    /// Comma-separated data file entries.
    #[arg(long, value_name = "LIST")]
    pub include_data_files: Option<String>,
    /// Comma-separated data directory entries.
    #[arg(long, value_name = "LIST")]
    pub include_data_dir: Option<String>,
    /// Comma-separated packages to include.
    #[arg(long, value_name = "LIST")]
    pub include_package: Option<String>,
    /// Comma-separated data file patterns to exclude.
    #[arg(long, value_name = "LIST")]
    pub noinclude_data_files: Option<String>,

    /// Whether `--mingw64` was given after `--clang`.
    #[arg(skip)]
    mingw64_last: bool,
}

impl Cli {
    /// Parses the process arguments, exiting on error like [`Parser::parse`].
    #[must_use]
    pub fn parse_ordered() -> Self {
        Self::try_parse_ordered_from(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Parses `args` and records which compiler toggle came last.
    ///
    /// The toggles are replayed in that order, so `--clang --mingw64=false`
    /// keeps clang while `--mingw64 --clang` switches to it.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] for invalid arguments and for help or
    /// version requests.
    pub fn try_parse_ordered_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let mut cli = Self::from_arg_matches(&matches)?;
        cli.options.mingw64_last = matches.index_of("mingw64") > matches.index_of("clang");
        Ok(cli)
    }
}

impl OptionArgs {
    /// Converts the supplied flags into option model edits.
    ///
    /// The mode comes first so later edits observe it. Toggles precede text,
    /// with the two compiler toggles in command-line order. Plugin disables
    /// follow enables, so `--plugin numpy --no-plugin numpy` leaves numpy off.
    #[must_use]
    pub fn into_edits(self) -> Vec<Edit> {
        let mut edits = Vec::new();
        edits.extend(self.mode.map(Edit::Mode));
        edits.extend(self.console_mode.map(Edit::ConsoleMode));
        edits.extend(self.lto.map(Edit::Lto));

        let toggles = [
            (ToggleField::Standalone, self.standalone),
            (ToggleField::Onefile, self.onefile),
            (ToggleField::RemoveOutput, self.remove_output),
            (ToggleField::UacAdmin, self.uac_admin),
            (ToggleField::UseJobs, self.use_jobs),
            (ToggleField::StaticLink, self.static_link),
            (ToggleField::FollowImports, self.follow_imports),
            (ToggleField::FollowStdlib, self.follow_stdlib),
        ];
        let compilers = if self.mingw64_last {
            [(ToggleField::Clang, self.clang), (ToggleField::Mingw64, self.mingw64)]
        } else {
            [(ToggleField::Mingw64, self.mingw64), (ToggleField::Clang, self.clang)]
        };
        edits.extend(
            toggles
                .into_iter()
                .chain(compilers)
                .filter_map(|(field, value)| value.map(|on| Edit::Toggle(field, on))),
        );

        let texts = [
            (TextField::Python, self.python),
            (TextField::Script, self.script),
            (TextField::OutputDir, self.output_dir),
            (TextField::OutputFilename, self.output_filename),
            (TextField::Icon, self.icon),
            (TextField::Splash, self.splash),
            (TextField::CompanyName, self.company_name),
            (TextField::ProductName, self.product_name),
            (TextField::Copyright, self.copyright),
            (TextField::Trademarks, self.trademarks),
            (TextField::FileDescription, self.file_description),
            (TextField::FileVersion, self.file_version),
            (TextField::ProductVersion, self.product_version),
            (TextField::Jobs, self.jobs),
            (TextField::FollowImportTo, self.follow_import_to),
            (TextField::NofollowImportTo, self.nofollow_import_to),
            (TextField::StdoutSpec, self.stdout_spec),
            (TextField::StderrSpec, self.stderr_spec),
            (TextField::CustomPlugins, self.custom_plugins),
            (TextField::DisabledPlugins, self.disabled_plugins),
            (TextField::UserPlugins, self.user_plugins),
            (TextField::IncludePackageData, self.include_package_data),
            (TextField::IncludeDataFiles, self.include_data_files),
            (TextField::IncludeDataDir, self.include_data_dir),
            (TextField::IncludePackage, self.include_package),
            (TextField::NoincludeDataFiles, self.noinclude_data_files),
        ];
        edits.extend(
            texts
                .into_iter()
                .filter_map(|(field, value)| value.map(|text| Edit::Text(field, text))),
        );

        edits.extend(self.plugins.into_iter().map(|plugin| Edit::Plugin(plugin, true)));
        edits.extend(
            self.no_plugins
                .into_iter()
                .map(|plugin| Edit::Plugin(plugin, false)),
        );
        edits
    }
}

#[cfg(test)]
mod tests;
