//! Config file discovery and layered loading.
//!
//! 1. Parse the embedded `defaults.toml`
//! 2. Merge the user file (`<config dir>/marin/config.toml`) if it exists
//! 3. Merge the explicit file, which must exist when named
//! 4. Apply environment overrides
//! 5. Deserialize and validate

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::env::{apply_env_overrides, collect_env_vars};
use crate::error::{ConfigError, ConfigResult};
use crate::merge::{ConfigLayer, FieldSources, deep_merge, record_leaves};
use crate::show::ResolvedConfig;
use crate::types::Config;
use crate::validate;

/// Embedded default configuration.
pub(crate) const DEFAULTS_TOML: &str = include_str!("defaults.toml");

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: usize = 1_048_576;

/// Inputs to a layered load.
///
/// [`ConfigSources::discover`] fills this from the real environment;
/// tests build it by hand.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// User config file. Skipped if it does not exist.
    pub user_file: Option<PathBuf>,
    /// Explicit config file. Must exist when set.
    pub explicit_file: Option<PathBuf>,
    /// Environment variables to apply.
    pub env: HashMap<String, String>,
}

impl ConfigSources {
    /// Sources from the platform config directory and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the config directory cannot
    /// be determined.
    pub fn discover(explicit_file: Option<&Path>) -> ConfigResult<Self> {
        Ok(Self {
            user_file: Some(user_config_path()?),
            explicit_file: explicit_file.map(Path::to_path_buf),
            env: collect_env_vars(),
        })
    }
}

/// Path of the user config file, `<config dir>/marin/config.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if the platform has no config
/// directory for the current user.
pub fn user_config_path() -> ConfigResult<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("marin").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load configuration from `sources`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if a file is unreadable or malformed, an
/// environment override is blank, or the merged configuration fails
/// validation.
pub fn load(sources: &ConfigSources) -> ConfigResult<ResolvedConfig> {
    let mut merged = parse_toml(DEFAULTS_TOML, "<embedded defaults>")?;
    let mut field_sources = FieldSources::new();
    let mut loaded_files = Vec::new();

    record_leaves(&merged, "", &ConfigLayer::Defaults, &mut field_sources);

    if let Some(path) = &sources.user_file
        && let Some(overlay) = try_load_file(path)?
    {
        deep_merge(&mut merged, &overlay, &ConfigLayer::User, &mut field_sources);
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded user config");
    }

    if let Some(path) = &sources.explicit_file {
        let overlay = read_file(path)?;
        deep_merge(
            &mut merged,
            &overlay,
            &ConfigLayer::Explicit,
            &mut field_sources,
        );
        loaded_files.push(path.display().to_string());
        info!(path = %path.display(), "loaded config file");
    }

    let env_count = apply_env_overrides(&mut merged, &mut field_sources, &sources.env)?;
    if env_count > 0 {
        debug!(count = env_count, "applied environment overrides");
    }

    let config: Config =
        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::ParseError {
                path: "<merged config>".to_owned(),
                source: e,
            })?;

    validate::validate(&config)?;

    Ok(ResolvedConfig {
        config,
        field_sources,
        loaded_files,
    })
}

/// Load a single file on top of the defaults, with no other layers.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read, parsed, or fails
/// validation.
pub fn load_file(path: &Path) -> ConfigResult<Config> {
    load(&ConfigSources {
        explicit_file: Some(path.to_path_buf()),
        ..ConfigSources::default()
    })
    .map(|resolved| resolved.config)
}

/// Read and parse a file that must exist.
fn read_file(path: &Path) -> ConfigResult<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_checked(&content, path)
}

/// Read and parse a file, returning `None` if it does not exist.
fn try_load_file(path: &Path) -> ConfigResult<Option<toml::Value>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, skipping");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };
    parse_checked(&content, path).map(Some)
}

fn parse_checked(content: &str, path: &Path) -> ConfigResult<toml::Value> {
    if content.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }
    parse_toml(content, &path.display().to_string())
}

fn parse_toml(content: &str, origin: &str) -> ConfigResult<toml::Value> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: origin.to_owned(),
        source: e,
    })
}
