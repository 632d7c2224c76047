#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layered configuration for Marin widgets.
//!
//! A single [`Config`] holds the store keys, broadcast actions, host
//! command bindings and logging settings.
//!
//! # Usage
//!
//! ```rust,no_run
//! use marin_config::Config;
//!
//! let resolved = Config::load(None).unwrap();
//! println!("vessel key: {}", resolved.config.store.vessel_key);
//! ```
//!
//! # Configuration Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`MARIN_LOG_LEVEL`, `MARIN_PREFS_PATH`)
//! 2. **Explicit file** passed by the caller
//! 3. **User** (`<config dir>/marin/config.toml`)
//! 4. **Embedded defaults** (`defaults.toml` compiled into the binary)
//!
//! This crate depends on no other marin crate. Converting config values
//! into pipeline types happens where the pipeline is assembled.

/// Environment variable overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Layered configuration merging.
pub mod merge;
/// Resolved configuration display.
pub mod show;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigSources;
pub use show::ResolvedConfig;
pub use types::*;

impl Config {
    /// Load configuration with the full precedence chain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any config file is malformed, the
    /// config directory cannot be found, or the final configuration fails
    /// validation.
    pub fn load(explicit_file: Option<&std::path::Path>) -> ConfigResult<ResolvedConfig> {
        loader::load(&ConfigSources::discover(explicit_file)?)
    }

    /// Load a single file on top of the defaults, ignoring the user file
    /// and the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load_file(path)
    }
}
