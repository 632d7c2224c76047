//! CLI handlers for the `marin config` subcommand.

use anyhow::Result;
use marin_config::env::{LOG_LEVEL_VAR, PREFS_PATH_VAR};
use marin_config::loader::user_config_path;
use marin_config::{ConfigResult, ResolvedConfig};

use crate::theme::Theme;

/// Print the resolved configuration as TOML.
///
/// With `sources`, also list which layer set each field.
pub(crate) fn show_config(resolved: &ResolvedConfig, sources: bool) -> Result<()> {
    println!("{}", resolved.to_annotated_toml()?);

    if sources {
        let mut fields: Vec<_> = resolved.field_sources.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        println!("{}", Theme::header("Field sources"));
        for (field, layer) in fields {
            println!("  {field} {}", Theme::dimmed(&format!("<- {layer}")));
        }
    }
    Ok(())
}

/// Report whether the configuration loaded and validated.
pub(crate) fn validate_config(loaded: ConfigResult<ResolvedConfig>) -> Result<()> {
    match loaded {
        Ok(resolved) => {
            println!("{}", Theme::success("Configuration is valid."));
            if !resolved.loaded_files.is_empty() {
                println!("\nLoaded files:");
                for path in &resolved.loaded_files {
                    println!("  - {path}");
                }
            }
            Ok(())
        },
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("Configuration error: {e}")));
            std::process::exit(1);
        },
    }
}

/// Show the config file locations and environment overrides.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn show_paths() -> Result<()> {
    println!("Configuration files checked (in precedence order):\n");
    println!("  1. <embedded defaults>");
    match user_config_path() {
        Ok(path) => {
            let status = if path.exists() { "found" } else { "not found" };
            println!("  2. {}  [{status}]", path.display());
        },
        Err(e) => println!("  2. {}", Theme::warning(&e.to_string())),
    }
    println!("  3. --config <file>");

    println!("\nEnvironment variable overrides:");
    println!("  {LOG_LEVEL_VAR:<16} -> logging.level");
    println!("  {PREFS_PATH_VAR:<16} -> store.prefs_path");
    Ok(())
}
