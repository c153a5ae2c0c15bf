//! Build options collected for a single Nuitka invocation.
//!
//! [`BuildConfig`] is a flat record of every user-adjustable compiler flag.
//! Values are stored exactly as entered; nothing here validates paths,
//! versions, or job counts. Enumerated options carry their external spelling
//! so TOML files, environment variables, and CLI flags agree.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::thread;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of artefact Nuitka should produce.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum,
)]
pub enum BuildMode {
    /// Executable without a console window.
    #[default]
    #[serde(rename = "windowed")]
    #[value(name = "windowed")]
    WindowedExecutable,
    /// Executable that keeps its console window.
    #[serde(rename = "console")]
    #[value(name = "console")]
    ConsoleExecutable,
    /// Python extension module (`.pyd` / `.so`).
    #[serde(rename = "module")]
    #[value(name = "module")]
    ExtensionModule,
}

/// Console behaviour passed through `--windows-console-mode`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ConsoleMode {
    /// Attach to the parent console when one exists.
    Attach,
    /// Always create a console.
    #[default]
    Force,
    /// Hide the console.
    Hide,
}

impl ConsoleMode {
    /// Returns the value spelled on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attach => "attach",
            Self::Force => "force",
            Self::Hide => "hide",
        }
    }
}

/// Link-time optimisation setting passed through `--lto`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum LtoMode {
    /// Force LTO on.
    #[default]
    Yes,
    /// Disable LTO.
    No,
    /// Let Nuitka decide.
    Auto,
}

impl LtoMode {
    /// Returns the value spelled on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Auto => "auto",
        }
    }
}

/// Plugins offered as individual toggles.
///
/// Declaration order is the order in which enabled plugins are emitted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum KnownPlugin {
    /// Qt bindings via PyQt5.
    Pyqt5,
    /// Qt bindings via PyQt6.
    Pyqt6,
    /// Qt bindings via PySide2.
    Pyside2,
    /// Qt bindings via PySide6.
    Pyside6,
    /// Numerical computing support.
    Numpy,
    /// PyTorch support.
    Torch,
    /// Matplotlib backends and data files.
    Matplotlib,
    /// Tk GUI toolkit.
    Tkinter,
    /// Gevent green threads.
    Gevent,
}

impl KnownPlugin {
    /// Every known plugin in emission order.
    pub const ALL: [Self; 9] = [
        Self::Pyqt5,
        Self::Pyqt6,
        Self::Pyside2,
        Self::Pyside6,
        Self::Numpy,
        Self::Torch,
        Self::Matplotlib,
        Self::Tkinter,
        Self::Gevent,
    ];

    /// Returns the plugin name Nuitka expects after `--enable-plugin=`.
    #[must_use]
    pub const fn plugin_name(self) -> &'static str {
        match self {
            Self::Pyqt5 => "pyqt5",
            Self::Pyqt6 => "pyqt6",
            Self::Pyside2 => "pyside2",
            Self::Pyside6 => "pyside6",
            Self::Numpy => "numpy",
            Self::Torch => "torch",
            Self::Matplotlib => "matplotlib",
            Self::Tkinter => "tk-inter",
            Self::Gevent => "gevent",
        }
    }
}

/// Every option that shapes the generated command.
///
/// Fields stay public so the model, the builder, and the CLI loader can read
/// and write them without accessor boilerplate. Comma-separated list fields
/// are kept as raw text and only split when the command is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Interpreter used to run `-m nuitka`.
    pub python: String,
    /// Entry script compiled by Nuitka.
    pub script: String,
    /// Directory receiving the build output.
    pub output_dir: String,
    /// File name of the produced artefact.
    pub output_filename: String,

    /// Selected artefact kind.
    pub mode: BuildMode,
    /// Bundle the interpreter and dependencies.
    pub standalone: bool,
    /// Pack the standalone folder into one file.
    pub onefile: bool,
    /// Remove the build directory afterwards.
    pub remove_output: bool,
    /// Request elevation when the executable starts.
    pub uac_admin: bool,
    /// Console behaviour of the executable.
    pub console_mode: ConsoleMode,

    /// Icon embedded in the executable.
    pub icon: String,
    /// Splash image shown while a onefile build unpacks.
    pub splash: String,
    /// Windows resource: company name.
    pub company_name: String,
    /// Windows resource: product name.
    pub product_name: String,
    /// Windows resource: copyright notice.
    pub copyright: String,
    /// Windows resource: trademarks.
    pub trademarks: String,
    /// Windows resource: file description.
    pub file_description: String,
    /// Windows resource: file version.
    pub file_version: String,
    /// Windows resource: product version.
    pub product_version: String,

    /// Enables the custom job count below.
    pub use_jobs: bool,
    /// Parallel C compilation jobs, passed through verbatim.
    pub jobs: String,
    /// Link-time optimisation.
    pub lto: LtoMode,
    /// Force the Clang compiler.
    pub clang: bool,
    /// Force the MinGW64 compiler.
    pub mingw64: bool,
    /// Static C++ runtime toggle.
    pub static_link: bool,

    /// Follow all imports.
    pub follow_imports: bool,
    /// Follow imports into the standard library.
    pub follow_stdlib: bool,
    /// Packages to follow, emitted as a single quoted value.
    pub follow_import_to: String,
    /// Packages not to follow, emitted as a single quoted value.
    pub nofollow_import_to: String,

    /// Target specification for standard output.
    pub stdout_spec: String,
    /// Target specification for standard error.
    pub stderr_spec: String,

    /// Enabled plugins from the fixed toggle set.
    pub plugins: BTreeSet<KnownPlugin>,
    /// Additional plugin names, comma separated.
    pub custom_plugins: String,
    /// Plugins to disable, comma separated.
    pub disabled_plugins: String,
    /// User plugin files, comma separated.
    pub user_plugins: String,

    /// Packages whose data files are included, comma separated.
    pub include_package_data: String,
    /// `source=destination` file pairs, comma separated.
    pub include_data_files: String,
    /// `source=destination` directory pairs, comma separated.
    pub include_data_dir: String,
    /// Packages included even when not imported, comma separated.
    pub include_package: String,
    /// Data file patterns to exclude, comma separated.
    pub noinclude_data_files: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            script: String::new(),
            output_dir: String::new(),
            output_filename: String::new(),
            mode: BuildMode::default(),
            standalone: true,
            onefile: false,
            remove_output: true,
            uac_admin: false,
            console_mode: ConsoleMode::default(),
            icon: String::new(),
            splash: String::new(),
            company_name: String::new(),
            product_name: String::new(),
            copyright: String::new(),
            trademarks: String::new(),
            file_description: String::new(),
            file_version: default_version(),
            product_version: default_version(),
            use_jobs: false,
            jobs: detected_job_count(),
            lto: LtoMode::default(),
            clang: false,
            mingw64: false,
            static_link: false,
            follow_imports: false,
            follow_stdlib: false,
            follow_import_to: String::new(),
            nofollow_import_to: String::new(),
            stdout_spec: String::new(),
            stderr_spec: String::new(),
            plugins: BTreeSet::new(),
            custom_plugins: String::new(),
            disabled_plugins: String::new(),
            user_plugins: String::new(),
            include_package_data: String::new(),
            include_data_files: String::new(),
            include_data_dir: String::new(),
            include_package: String::new(),
            noinclude_data_files: String::new(),
        }
    }
}

impl BuildConfig {
    /// Reports whether `plugin` is toggled on.
    #[must_use]
    pub fn plugin_enabled(&self, plugin: KnownPlugin) -> bool {
        self.plugins.contains(&plugin)
    }

    /// Toggles `plugin` on or off.
    pub fn set_plugin(&mut self, plugin: KnownPlugin, enabled: bool) {
        if enabled {
            self.plugins.insert(plugin);
        } else {
            self.plugins.remove(&plugin);
        }
    }
}

fn default_python() -> String {
    String::from("python")
}

fn default_version() -> String {
    String::from("1.0.0.0")
}

/// Logical core count rendered as text, used as the default job count.
#[must_use]
pub fn detected_job_count() -> String {
    thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .to_string()
}
