//! Test suites covering the CLI surface and configuration layering.

pub mod helpers;
mod parsing;
