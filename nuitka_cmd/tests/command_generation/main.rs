//! `rstest-bdd` scaffolding for the command generation behaviour suite.
//!
//! Scenarios drive a [`nuitka_cmd::session::Session`] directly, so they
//! exercise the option model and the command builder without spawning the
//! binary.

mod fixtures;
mod steps;

use fixtures::{CommandState, command_state};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/command_generation.feature",
    fixtures = [command_state: CommandState]
);
