//! Step definitions for the command generation scenarios.

use super::fixtures::{CommandState, Generated};
use anyhow::{Result, anyhow, ensure};
use clap::ValueEnum;
use nuitka_cmd::error::BuildError;
use nuitka_cmd::model::{Edit, TextField, ToggleField};
use nuitka_cmd::options::{BuildMode, KnownPlugin};
use nuitka_cmd::session::Session;
use rstest_bdd::ScenarioState as _;
use rstest_bdd_macros::{given, then, when};

/// Strips one layer of matching double quotes from a placeholder value.
fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(trimmed)
}

fn text_field(name: &str) -> Result<TextField> {
    match name {
        "script" => Ok(TextField::Script),
        "icon" => Ok(TextField::Icon),
        "splash" => Ok(TextField::Splash),
        "jobs" => Ok(TextField::Jobs),
        "custom_plugins" => Ok(TextField::CustomPlugins),
        "include_data_files" => Ok(TextField::IncludeDataFiles),
        "include_package_data" => Ok(TextField::IncludePackageData),
        other => Err(anyhow!("unknown text field {other:?}")),
    }
}

fn toggle_field(name: &str) -> Result<ToggleField> {
    match name {
        "standalone" => Ok(ToggleField::Standalone),
        "onefile" => Ok(ToggleField::Onefile),
        "use_jobs" => Ok(ToggleField::UseJobs),
        "clang" => Ok(ToggleField::Clang),
        "mingw64" => Ok(ToggleField::Mingw64),
        "static_link" => Ok(ToggleField::StaticLink),
        other => Err(anyhow!("unknown toggle {other:?}")),
    }
}

fn apply(command_state: &CommandState, edit: Edit) -> Result<()> {
    let mut session = command_state
        .session
        .take()
        .ok_or_else(|| anyhow!("the session must be started first"))?;
    session.apply(edit);
    command_state.session.set(session);
    Ok(())
}

fn generate(command_state: &CommandState) -> Result<Generated> {
    let mut session = command_state
        .session
        .take()
        .ok_or_else(|| anyhow!("the session must be started first"))?;
    let generated = session.generate().map(str::to_owned);
    command_state.session.set(session);
    Ok(generated)
}

fn generated_tokens(command_state: &CommandState) -> Result<Vec<String>> {
    let generated = command_state
        .first
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("the command must be generated first"))?;
    let output = generated.map_err(|err| anyhow!("generation failed: {err}"))?;
    Ok(output.split(' ').map(str::to_owned).collect())
}

#[given("a fresh build session")]
fn fresh_session(command_state: &CommandState) {
    command_state.reset();
    command_state.session.set(Session::default());
}

#[given("the {field} field is {value}")]
fn set_text(command_state: &CommandState, field: String, value: String) -> Result<()> {
    let edit = Edit::Text(text_field(&field)?, unquote(&value).to_owned());
    apply(command_state, edit)
}

#[given("the {toggle} toggle is on")]
fn set_toggle(command_state: &CommandState, toggle: String) -> Result<()> {
    apply(command_state, Edit::Toggle(toggle_field(&toggle)?, true))
}

#[given("the {plugin} plugin is on")]
fn set_plugin(command_state: &CommandState, plugin: String) -> Result<()> {
    let known = KnownPlugin::from_str(&plugin, true).map_err(|err| anyhow!(err))?;
    apply(command_state, Edit::Plugin(known, true))
}

#[given("the build mode is {mode}")]
fn set_mode(command_state: &CommandState, mode: String) -> Result<()> {
    let parsed = BuildMode::from_str(&mode, true).map_err(|err| anyhow!(err))?;
    apply(command_state, Edit::Mode(parsed))
}

#[when("the command is generated")]
fn generate_once(command_state: &CommandState) -> Result<()> {
    let generated = generate(command_state)?;
    command_state.first.set(generated);
    Ok(())
}

#[when("the command is generated twice")]
fn generate_twice(command_state: &CommandState) -> Result<()> {
    let first = generate(command_state)?;
    let second = generate(command_state)?;
    command_state.first.set(first);
    command_state.second.set(second);
    Ok(())
}

#[then("the command starts with the nuitka invocation")]
fn starts_with_prefix(command_state: &CommandState) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    ensure!(
        tokens.starts_with(&[
            String::from("\"python\""),
            String::from("-m"),
            String::from("nuitka"),
        ]),
        "unexpected prefix in {tokens:?}"
    );
    Ok(())
}

#[then("the command contains {token}")]
fn contains_token(command_state: &CommandState, token: String) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    ensure!(tokens.contains(&token), "{token} missing from {tokens:?}");
    Ok(())
}

#[then("the command does not contain {prefix}")]
fn lacks_prefix(command_state: &CommandState, prefix: String) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    ensure!(
        !tokens.iter().any(|token| token.starts_with(prefix.as_str())),
        "{prefix} unexpectedly present in {tokens:?}"
    );
    Ok(())
}

#[then("the token {token} appears {count} times")]
fn token_count(command_state: &CommandState, token: String, count: usize) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    let seen = tokens.iter().filter(|candidate| **candidate == token).count();
    ensure!(seen == count, "{token} appeared {seen} times in {tokens:?}");
    Ok(())
}

#[then("the command ends with the script {script}")]
fn ends_with_script(command_state: &CommandState, script: String) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    let expected = format!("\"{script}\"");
    ensure!(
        tokens.last() == Some(&expected),
        "expected {expected} last in {tokens:?}"
    );
    Ok(())
}

#[then("the {prefix} tokens are {entries}")]
fn prefixed_tokens(command_state: &CommandState, prefix: String, entries: String) -> Result<()> {
    let tokens = generated_tokens(command_state)?;
    let actual: Vec<&str> = tokens
        .iter()
        .filter_map(|token| token.strip_prefix(prefix.as_str()))
        .collect();
    let expected: Vec<&str> = unquote(&entries).split(',').collect();
    ensure!(actual == expected, "expected {expected:?}, got {actual:?}");
    Ok(())
}

#[then("generation fails with a missing entry script")]
fn fails_without_script(command_state: &CommandState) -> Result<()> {
    let generated = command_state
        .first
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("the command must be generated first"))?;
    ensure!(
        generated == Err(BuildError::MissingEntryScript),
        "unexpected outcome {generated:?}"
    );
    let output = command_state
        .session
        .with_ref(|session| session.output().to_owned())
        .ok_or_else(|| anyhow!("session missing"))?;
    ensure!(output.is_empty(), "output surface was written: {output}");
    Ok(())
}

#[then("the compiler toggles are clang {clang} and mingw64 {mingw64}")]
fn compiler_toggles(command_state: &CommandState, clang: bool, mingw64: bool) -> Result<()> {
    let (actual_clang, actual_mingw64) = command_state
        .session
        .with_ref(|session| (session.model().config().clang, session.model().config().mingw64))
        .ok_or_else(|| anyhow!("session missing"))?;
    ensure!(actual_clang == clang, "clang = {actual_clang}");
    ensure!(actual_mingw64 == mingw64, "mingw64 = {actual_mingw64}");
    Ok(())
}

#[then("both generations match")]
fn generations_match(command_state: &CommandState) -> Result<()> {
    let first = command_state.first.with_ref(Clone::clone);
    let second = command_state.second.with_ref(Clone::clone);
    ensure!(first.is_some(), "first generation missing");
    ensure!(first == second, "generations differ: {first:?} vs {second:?}");
    Ok(())
}
