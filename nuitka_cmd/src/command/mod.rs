//! Command Builder: turns a [`BuildConfig`] snapshot into Nuitka arguments.
//!
//! [`build_command`] is pure and deterministic. It emits tokens block by
//! block in a fixed order because Nuitka resolves some repeated flags by
//! last-wins. User-supplied scalar values are wrapped in double quotes but
//! not otherwise escaped; embedded quotes pass through untouched.

use std::fmt;

use tracing::info;

use crate::error::BuildError;
use crate::model::is_executable_relevant;
use crate::options::{BuildConfig, BuildMode, KnownPlugin};

const METADATA_FLAGS: [(&str, fn(&BuildConfig) -> &str); 7] = [
    ("--windows-company-name", |c| c.company_name.as_str()),
    ("--windows-product-name", |c| c.product_name.as_str()),
    ("--copyright", |c| c.copyright.as_str()),
    ("--trademarks", |c| c.trademarks.as_str()),
    ("--windows-file-description", |c| c.file_description.as_str()),
    ("--windows-file-version", |c| c.file_version.as_str()),
    ("--windows-product-version", |c| c.product_version.as_str()),
];

const DATA_FLAGS: [(&str, fn(&BuildConfig) -> &str); 5] = [
    ("--include-package-data", |c| c.include_package_data.as_str()),
    ("--include-data-files", |c| c.include_data_files.as_str()),
    ("--include-data-dir", |c| c.include_data_dir.as_str()),
    ("--include-package", |c| c.include_package.as_str()),
    ("--noinclude-data-files", |c| c.noinclude_data_files.as_str()),
];

/// Ordered argument tokens of one Nuitka invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Returns the tokens in emission order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the command, returning its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// Joins the tokens with single spaces.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Builds the Nuitka invocation for `config`.
///
/// # Errors
///
/// Returns [`BuildError::MissingEntryScript`] when no entry script is set.
/// No tokens are produced in that case.
///
/// # Examples
///
/// ```
/// use nuitka_cmd::command::build_command;
/// use nuitka_cmd::options::BuildConfig;
///
/// let config = BuildConfig {
///     script: String::from("main.py"),
///     ..BuildConfig::default()
/// };
/// let command = build_command(&config).expect("script is set");
///
/// assert_eq!(command.tokens().first().map(String::as_str), Some("\"python\""));
/// assert_eq!(command.tokens().last().map(String::as_str), Some("\"main.py\""));
/// ```
pub fn build_command(config: &BuildConfig) -> Result<CommandLine, BuildError> {
    if config.script.is_empty() {
        return Err(BuildError::MissingEntryScript);
    }

    let mut tokens = vec![quoted(&config.python), String::from("-m"), String::from("nuitka")];
    push_mode_block(&mut tokens, config);
    push_metadata_block(&mut tokens, config);
    push_compiler_block(&mut tokens, config);
    push_import_block(&mut tokens, config);
    push_stream_block(&mut tokens, config);
    push_plugin_block(&mut tokens, config);
    push_data_block(&mut tokens, config);
    push_output_block(&mut tokens, config);
    tokens.push(quoted(&config.script));

    info!(count = tokens.len(), "generated nuitka command");
    Ok(CommandLine { tokens })
}

fn push_mode_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    if !is_executable_relevant(config.mode) {
        tokens.push(String::from("--module"));
        return;
    }
    if config.standalone {
        tokens.push(String::from("--standalone"));
    }
    if config.onefile {
        tokens.push(String::from("--onefile"));
    }
    if config.mode == BuildMode::WindowedExecutable {
        tokens.push(String::from("--windows-disable-console"));
    }
    if config.uac_admin {
        tokens.push(String::from("--windows-uac-admin"));
    }
    tokens.push(format!(
        "--windows-console-mode={}",
        config.console_mode.as_str()
    ));
    push_quoted_if_set(tokens, "--windows-icon-from-ico", &config.icon);
    push_quoted_if_set(
        tokens,
        "--onefile-windows-splash-screen-image",
        &config.splash,
    );
}

fn push_metadata_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    for (flag, field) in METADATA_FLAGS {
        push_quoted_if_set(tokens, flag, field(config));
    }
}

fn push_compiler_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    if config.use_jobs {
        tokens.push(format!("--jobs={}", config.jobs));
    }
    tokens.push(format!("--lto={}", config.lto.as_str()));
    if config.remove_output {
        tokens.push(String::from("--remove-output"));
    }
    if config.clang {
        tokens.push(String::from("--clang"));
    }
    if config.mingw64 {
        tokens.push(String::from("--mingw64"));
    }
    // Emits the disabling form on purpose; existing users rely on this output.
    if config.static_link {
        tokens.push(String::from("--static-libpython=no"));
    }
}

fn push_import_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    if config.follow_imports {
        tokens.push(String::from("--follow-imports"));
    }
    if config.follow_stdlib {
        tokens.push(String::from("--follow-stdlib"));
    }
    push_quoted_if_set(tokens, "--follow-import-to", &config.follow_import_to);
    push_quoted_if_set(tokens, "--nofollow-import-to", &config.nofollow_import_to);
}

fn push_stream_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    push_quoted_if_set(tokens, "--force-stdout-spec", &config.stdout_spec);
    push_quoted_if_set(tokens, "--force-stderr-spec", &config.stderr_spec);
}

fn push_plugin_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    for plugin in KnownPlugin::ALL {
        if config.plugin_enabled(plugin) {
            tokens.push(format!("--enable-plugin={}", plugin.plugin_name()));
        }
    }
    for name in split_list(&config.custom_plugins) {
        tokens.push(format!("--enable-plugin={name}"));
    }
    for name in split_list(&config.disabled_plugins) {
        tokens.push(format!("--disable-plugin={name}"));
    }
    for path in split_list(&config.user_plugins) {
        tokens.push(format!("--user-plugin={}", quoted(path)));
    }
}

fn push_data_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    for (flag, field) in DATA_FLAGS {
        for entry in split_list(field(config)) {
            tokens.push(format!("{flag}={entry}"));
        }
    }
}

fn push_output_block(tokens: &mut Vec<String>, config: &BuildConfig) {
    push_quoted_if_set(tokens, "--output-dir", &config.output_dir);
    push_quoted_if_set(tokens, "--output-filename", &config.output_filename);
}

fn push_quoted_if_set(tokens: &mut Vec<String>, flag: &str, value: &str) {
    if !value.is_empty() {
        tokens.push(format!("{flag}={}", quoted(value)));
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Splits a comma-separated field into trimmed, non-empty entries.
///
/// # Examples
///
/// ```
/// use nuitka_cmd::command::split_list;
///
/// let entries: Vec<_> = split_list(" a.txt=dst/a.txt, ,b.txt ").collect();
/// assert_eq!(entries, ["a.txt=dst/a.txt", "b.txt"]);
/// ```
pub fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}
