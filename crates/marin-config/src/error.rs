//! Configuration errors.

use thiserror::Error;

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML, or the merged tree does not fit
    /// the configuration schema.
    #[error("failed to parse config {path}: {source}")]
    ParseError {
        /// Path of the file, or a placeholder for in-memory layers.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or conflicts with another value.
    #[error("invalid value for {field}: {message}")]
    ValidationError {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An environment override is unusable.
    #[error("invalid environment variable {var}: {message}")]
    EnvError {
        /// Variable name.
        var: String,
        /// What is wrong with it.
        message: String,
    },

    /// The platform config directory could not be determined.
    #[error("could not determine the user config directory")]
    NoConfigDir,

    /// The resolved configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
