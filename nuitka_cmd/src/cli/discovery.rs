//! Locates the TOML file that forms the file layer.

use std::path::Path;
use std::sync::Arc;

use ortho_config::{ConfigDiscovery, MergeLayer, OrthoError};
use tracing::debug;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "NUITKA_CMD_CONFIG_PATH";

/// Dotfile searched in the working directory and the home directory.
pub const LOCAL_CONFIG_FILE: &str = ".nuitka_cmd.toml";

fn discovery(explicit: Option<&Path>) -> ConfigDiscovery {
    let builder = ConfigDiscovery::builder("nuitka_cmd")
        .env_var(CONFIG_PATH_ENV)
        .dotfile_name(LOCAL_CONFIG_FILE);
    match explicit {
        Some(path) => builder.add_required_path(path).build(),
        None => builder.build(),
    }
}

#[cfg(test)]
pub(super) fn config_candidates(explicit: Option<&Path>) -> Vec<std::path::PathBuf> {
    discovery(explicit).candidates()
}

/// Loads the first configuration file found, following its `extends` chain.
///
/// `--config` is required and checked first. After it come
/// [`CONFIG_PATH_ENV`], the platform configuration directories, and
/// [`LOCAL_CONFIG_FILE`] in the home and working directories. Errors from a
/// required path are always reported; failures of optional candidates only
/// matter when no file loads.
pub(super) fn discover_file_layers(
    explicit: Option<&Path>,
) -> (Vec<MergeLayer<'static>>, Vec<Arc<OrthoError>>) {
    let outcome = discovery(explicit).compose_layers();
    let mut errors = outcome.required_errors;
    if outcome.value.is_empty() {
        errors.extend(outcome.optional_errors);
    }
    for layer in &outcome.value {
        debug!(path = ?layer.path(), "configuration file layer loaded");
    }
    (outcome.value, errors)
}
