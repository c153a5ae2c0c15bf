//! Library facade for `nuitka-cmd`: build options, the option model, and the
//! command builder, so integration tests and other front-ends can drive the
//! same logic as the binary.

pub mod cli;
pub mod collaborators;
pub mod command;
pub mod error;
pub mod model;
pub mod options;
pub mod session;
