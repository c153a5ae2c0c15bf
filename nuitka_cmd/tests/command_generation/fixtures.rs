//! Scenario storage shared by the command generation steps.

use nuitka_cmd::error::BuildError;
use nuitka_cmd::session::Session;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Outcome of one `generate` call.
pub type Generated = Result<String, BuildError>;

#[derive(Debug, Default, ScenarioState)]
pub struct CommandState {
    pub session: Slot<Session>,
    pub first: Slot<Generated>,
    pub second: Slot<Generated>,
}

/// Provides a resettable scenario state for each scenario.
#[fixture]
pub fn command_state() -> CommandState {
    CommandState::default()
}
