//! Resolved configuration display.

use crate::error::ConfigResult;
use crate::merge::FieldSources;
use crate::types::Config;

/// A loaded configuration together with where its values came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Which layer set each field.
    pub field_sources: FieldSources,
    /// Files that contributed, lowest precedence first.
    pub loaded_files: Vec<String>,
}

impl ResolvedConfig {
    /// Render the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SerializeError`](crate::ConfigError::SerializeError)
    /// if the configuration cannot be serialized.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(&self.config)?)
    }

    /// Render the configuration as TOML, preceded by comment lines naming
    /// the files that were loaded.
    ///
    /// # Errors
    ///
    /// Same as [`to_toml`](Self::to_toml).
    pub fn to_annotated_toml(&self) -> ConfigResult<String> {
        let mut out = String::new();
        if self.loaded_files.is_empty() {
            out.push_str("# loaded from: defaults only\n");
        } else {
            for file in &self.loaded_files {
                out.push_str("# loaded from: ");
                out.push_str(file);
                out.push('\n');
            }
        }
        out.push('\n');
        out.push_str(&self.to_toml()?);
        Ok(out)
    }
}
