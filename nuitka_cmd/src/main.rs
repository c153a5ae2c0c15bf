//! `nuitka-cmd` entry-point: load layered options, apply CLI edits, print the
//! Nuitka invocation.

use std::io::Write;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use nuitka_cmd::cli::{Cli, load_build_config};
use nuitka_cmd::collaborators::SystemClipboard;
use nuitka_cmd::error::Result;
use nuitka_cmd::model::OptionModel;
use nuitka_cmd::session::Session;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run().map_err(color_eyre::eyre::Report::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse_ordered();
    let config = load_build_config(cli.config_path.as_deref())?;
    let mut session = Session::new(OptionModel::new(config));
    for edit in cli.options.into_edits() {
        session.apply(edit);
    }
    let command = session.generate()?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{command}")?;
    stdout.flush()?;

    if cli.copy {
        let clipboard = SystemClipboard::detect();
        if let Err(err) = session.copy_output(&clipboard) {
            warn!(
                program = clipboard.program(),
                error = %err,
                "could not copy the command to the clipboard"
            );
        }
    }
    Ok(())
}
