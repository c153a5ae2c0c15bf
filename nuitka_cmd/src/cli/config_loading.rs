//! Composes the default, file, and environment layers into a [`BuildConfig`].
//!
//! CLI flags are not merged here. They arrive later as option model edits so
//! the derived-state rules see them.

use std::collections::BTreeSet;
use std::path::Path;

use ortho_config::declarative::{LayerComposition, from_value_merge, merge_value};
use ortho_config::figment::Figment;
use ortho_config::figment::providers::Env;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{CsvEnv, MergeComposer, MergeLayer, OrthoResult, OrthoResultExt};
use tracing::debug;

use super::discovery::discover_file_layers;
use crate::error::Result;
use crate::options::BuildConfig;

/// Prefix shared by every environment variable the loader reads.
pub const ENV_PREFIX: &str = "NUITKA_CMD_";

/// Loads the configuration from defaults, the TOML file, and the environment.
///
/// # Errors
///
/// Returns [`crate::error::NuitkaCmdError::Configuration`] when `--config`
/// names a missing file, or when a layer cannot be read or deserialised.
pub fn load_build_config(config_override: Option<&Path>) -> Result<BuildConfig> {
    let defaults = serde_json::to_value(BuildConfig::default()).into_ortho()?;
    let text_keys = text_keys(&defaults);
    let (file_layers, mut errors) = discover_file_layers(config_override);

    let mut composer = MergeComposer::with_capacity(file_layers.len() + 2);
    composer.push_defaults(defaults);
    for layer in file_layers {
        composer.push_layer(layer);
    }
    match environment_layer(&text_keys) {
        Ok(value) => composer.push_environment(value),
        Err(err) => errors.push(err),
    }

    let config = LayerComposition::new(composer.layers(), errors).into_merge_result(merge_layers)?;
    debug!(script = %config.script, mode = ?config.mode, "configuration layers merged");
    Ok(config)
}

fn merge_layers(layers: Vec<MergeLayer<'static>>) -> OrthoResult<BuildConfig> {
    let mut merged = Value::Object(Map::new());
    for layer in layers {
        merge_value(&mut merged, layer.into_value());
    }
    from_value_merge(merged)
}

/// Keys whose default is a string.
fn text_keys(defaults: &Value) -> BTreeSet<String> {
    defaults
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .filter(|(_, value)| value.is_string())
                .map(|(key, _)| key.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Reads `NUITKA_CMD_*` variables, splitting comma lists into arrays.
///
/// Parsing would turn `NUITKA_CMD_JOBS=4` into a number and
/// `NUITKA_CMD_FILE_VERSION=1.10` into the float `1.1`, so text fields are
/// put back to the raw variable value afterwards.
fn environment_layer(text_keys: &BTreeSet<String>) -> OrthoResult<Value> {
    let env = CsvEnv::prefixed(ENV_PREFIX);
    let mut value = Figment::from(env.clone()).extract::<Value>().into_ortho()?;
    if let Value::Object(fields) = &mut value {
        fields.remove("config_path");
        let raw: &Env = &env;
        for (key, text) in raw.iter() {
            if text_keys.contains(key.as_str()) {
                fields.insert(key.as_str().to_owned(), Value::String(text));
            }
        }
    }
    Ok(value)
}
