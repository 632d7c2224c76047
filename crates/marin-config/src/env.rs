//! Environment variable overrides.
//!
//! Environment variables are the top layer: when set they replace whatever
//! the files say.

use std::collections::HashMap;

use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources};

/// Overrides `logging.level`.
pub const LOG_LEVEL_VAR: &str = "MARIN_LOG_LEVEL";

/// Overrides `store.prefs_path`.
pub const PREFS_PATH_VAR: &str = "MARIN_PREFS_PATH";

/// Variable name and the dotted config path it sets.
const OVERRIDES: [(&str, [&str; 2]); 2] = [
    (LOG_LEVEL_VAR, ["logging", "level"]),
    (PREFS_PATH_VAR, ["store", "prefs_path"]),
];

/// Snapshot the variables this crate reads from the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    OVERRIDES
        .iter()
        .filter_map(|(var, _)| std::env::var(var).ok().map(|value| ((*var).to_owned(), value)))
        .collect()
}

/// Apply every set override to the merged tree.
///
/// Returns how many overrides were applied.
///
/// # Errors
///
/// Returns [`ConfigError::EnvError`] if a variable is set but blank.
pub fn apply_env_overrides(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env: &HashMap<String, String>,
) -> ConfigResult<usize> {
    let mut applied: usize = 0;

    for (var, [section, field]) in OVERRIDES {
        let Some(value) = env.get(var) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::EnvError {
                var: var.to_owned(),
                message: "must not be blank".to_owned(),
            });
        }

        let Some(root) = merged.as_table_mut() else {
            continue;
        };
        let table = root
            .entry(section)
            .or_insert(toml::Value::Table(toml::Table::new()));
        if let Some(table) = table.as_table_mut() {
            table.insert(field.to_owned(), toml::Value::String(value.to_owned()));
            sources.insert(format!("{section}.{field}"), ConfigLayer::Environment);
            applied = applied.saturating_add(1);
        }
    }

    Ok(applied)
}
