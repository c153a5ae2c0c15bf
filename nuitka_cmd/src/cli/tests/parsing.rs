//! CLI argument parsing scenarios.

use std::path::Path;

use super::helpers::parse_command_line;
use crate::options::{BuildMode, ConsoleMode, KnownPlugin, LtoMode};
use anyhow::{Result, ensure};
use rstest::rstest;

#[rstest]
#[case::absent(&[], None)]
#[case::bare(&["--standalone"], Some(true))]
#[case::explicit_true(&["--standalone=true"], Some(true))]
#[case::explicit_false(&["--standalone=false"], Some(false))]
fn boolean_flags_take_an_optional_value(
    #[case] args: &[&str],
    #[case] expected: Option<bool>,
) -> Result<()> {
    let cli = parse_command_line(args)?;
    ensure!(
        cli.options.standalone == expected,
        "standalone = {:?}",
        cli.options.standalone
    );
    Ok(())
}

#[rstest]
fn boolean_values_require_equals() -> Result<()> {
    ensure!(
        parse_command_line(&["--onefile", "false"]).is_err(),
        "a detached value should be rejected"
    );
    Ok(())
}

#[rstest]
#[case::clang_last(&["--mingw64", "--clang"], Some(true), Some(true))]
#[case::false_after_true(&["--clang", "--mingw64=false"], Some(true), Some(false))]
#[case::only_clang(&["--clang"], Some(true), None)]
fn compiler_flags_keep_their_own_values(
    #[case] args: &[&str],
    #[case] clang: Option<bool>,
    #[case] mingw64: Option<bool>,
) -> Result<()> {
    let cli = parse_command_line(args)?;
    ensure!(cli.options.clang == clang, "clang = {:?}", cli.options.clang);
    ensure!(
        cli.options.mingw64 == mingw64,
        "mingw64 = {:?}",
        cli.options.mingw64
    );
    Ok(())
}

#[rstest]
fn enumerated_options_use_their_external_spelling() -> Result<()> {
    let cli = parse_command_line(&[
        "--mode",
        "console",
        "--console-mode",
        "hide",
        "--lto",
        "auto",
        "--plugin",
        "tkinter",
        "--plugin",
        "numpy",
        "--no-plugin",
        "torch",
    ])?;
    ensure!(cli.options.mode == Some(BuildMode::ConsoleExecutable), "mode");
    ensure!(cli.options.console_mode == Some(ConsoleMode::Hide), "console mode");
    ensure!(cli.options.lto == Some(LtoMode::Auto), "lto");
    ensure!(
        cli.options.plugins == [KnownPlugin::Tkinter, KnownPlugin::Numpy],
        "plugins = {:?}",
        cli.options.plugins
    );
    ensure!(cli.options.no_plugins == [KnownPlugin::Torch], "no plugins");
    Ok(())
}

#[rstest]
#[case::mode(&["--mode", "library"])]
#[case::plugin(&["--plugin", "tk-inter"])]
#[case::lto(&["--lto", "maybe"])]
fn unknown_enumerated_values_are_rejected(#[case] args: &[&str]) -> Result<()> {
    ensure!(parse_command_line(args).is_err(), "{args:?} should fail");
    Ok(())
}

#[rstest]
fn config_path_and_copy_are_recognised() -> Result<()> {
    let cli = parse_command_line(&["-c", "build.toml", "--copy", "--script", "app.py"])?;
    ensure!(
        cli.config_path.as_deref() == Some(Path::new("build.toml")),
        "config path = {:?}",
        cli.config_path
    );
    ensure!(cli.copy, "copy flag not set");
    ensure!(
        cli.options.script.as_deref() == Some("app.py"),
        "script = {:?}",
        cli.options.script
    );
    Ok(())
}
