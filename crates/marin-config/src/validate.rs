//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Log levels accepted in `logging.level`.
pub const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Formats accepted in `logging.format`.
pub const VALID_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Targets accepted in `logging.target`.
pub const VALID_TARGETS: [&str; 3] = ["stderr", "stdout", "file"];

/// Rotations accepted in `logging.rotation`.
pub const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Validate a fully merged configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_store(config)?;
    validate_events(config)?;
    validate_commands(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn require_non_empty(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn validate_store(config: &Config) -> ConfigResult<()> {
    let s = &config.store;

    require_non_empty("store.vessel_key", &s.vessel_key)?;
    require_non_empty("store.alert_history_key", &s.alert_history_key)?;

    if s.vessel_key == s.alert_history_key {
        return Err(invalid(
            "store.alert_history_key",
            format!("'{}' is already used by store.vessel_key", s.alert_history_key),
        ));
    }

    if let Some(path) = &s.prefs_path
        && path.as_os_str().is_empty()
    {
        return Err(invalid("store.prefs_path", "must not be empty when set"));
    }

    Ok(())
}

fn validate_events(config: &Config) -> ConfigResult<()> {
    let e = &config.events;

    require_non_empty("events.vessel_refresh_action", &e.vessel_refresh_action)?;
    require_non_empty("events.alert_refresh_action", &e.alert_refresh_action)?;
    require_non_empty("events.update_action", &e.update_action)?;

    if e.vessel_refresh_action == e.alert_refresh_action {
        return Err(invalid(
            "events.alert_refresh_action",
            "must differ from events.vessel_refresh_action",
        ));
    }

    for (field, action) in [
        ("events.vessel_refresh_action", &e.vessel_refresh_action),
        ("events.alert_refresh_action", &e.alert_refresh_action),
    ] {
        if *action == e.update_action {
            return Err(invalid(field, "must differ from events.update_action"));
        }
    }

    Ok(())
}

fn validate_commands(config: &Config) -> ConfigResult<()> {
    let c = &config.commands;

    require_non_empty("commands.vessel.channel", &c.vessel.channel)?;
    require_non_empty("commands.vessel.method", &c.vessel.method)?;
    require_non_empty("commands.alert_history.channel", &c.alert_history.channel)?;
    require_non_empty("commands.alert_history.method", &c.alert_history.method)?;

    if c.vessel == c.alert_history {
        return Err(invalid(
            "commands.alert_history",
            format!(
                "{}/{} is already bound to the vessel widget",
                c.alert_history.channel, c.alert_history.method
            ),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !VALID_LEVELS.contains(&l.level.as_str()) {
        return Err(invalid(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                l.level,
                VALID_LEVELS.join(", ")
            ),
        ));
    }

    if !VALID_FORMATS.contains(&l.format.as_str()) {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                l.format,
                VALID_FORMATS.join(", ")
            ),
        ));
    }

    if !VALID_TARGETS.contains(&l.target.as_str()) {
        return Err(invalid(
            "logging.target",
            format!(
                "unsupported log target '{}'; expected one of: {}",
                l.target,
                VALID_TARGETS.join(", ")
            ),
        ));
    }

    if !VALID_ROTATIONS.contains(&l.rotation.as_str()) {
        return Err(invalid(
            "logging.rotation",
            format!(
                "unsupported rotation '{}'; expected one of: {}",
                l.rotation,
                VALID_ROTATIONS.join(", ")
            ),
        ));
    }

    if l.target == "file" && l.directory.is_none() {
        return Err(invalid("logging.directory", "file logging needs a directory"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CommandBinding;
    use std::path::PathBuf;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_store_keys() {
        let mut config = Config::default();
        config.store.vessel_key = " ".to_owned();
        assert_eq!(field_of(validate(&config)), "store.vessel_key");

        let mut config = Config::default();
        config.store.alert_history_key = config.store.vessel_key.clone();
        assert_eq!(field_of(validate(&config)), "store.alert_history_key");

        let mut config = Config::default();
        config.store.prefix = String::new();
        assert!(validate(&config).is_ok());

        config.store.prefs_path = Some(PathBuf::new());
        assert_eq!(field_of(validate(&config)), "store.prefs_path");
    }

    #[test]
    fn test_actions_must_be_distinct() {
        let mut config = Config::default();
        config.events.alert_refresh_action = config.events.vessel_refresh_action.clone();
        assert_eq!(field_of(validate(&config)), "events.alert_refresh_action");

        let mut config = Config::default();
        config.events.vessel_refresh_action = config.events.update_action.clone();
        assert_eq!(field_of(validate(&config)), "events.vessel_refresh_action");

        let mut config = Config::default();
        config.events.update_action = String::new();
        assert_eq!(field_of(validate(&config)), "events.update_action");
    }

    #[test]
    fn test_command_bindings() {
        let mut config = Config::default();
        config.commands.vessel.method = String::new();
        assert_eq!(field_of(validate(&config)), "commands.vessel.method");

        let mut config = Config::default();
        config.commands.alert_history = config.commands.vessel.clone();
        assert_eq!(field_of(validate(&config)), "commands.alert_history");

        // Same channel, different methods is fine.
        let mut config = Config::default();
        config.commands.alert_history =
            CommandBinding::new(config.commands.vessel.channel.clone(), "updateWidget");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_logging() {
        let mut config = Config::default();
        config.logging.level = "loud".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");

        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");

        let mut config = Config::default();
        config.logging.target = "syslog".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.target");

        let mut config = Config::default();
        config.logging.rotation = "weekly".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.rotation");
    }

    #[test]
    fn test_file_logging_needs_directory() {
        let mut config = Config::default();
        config.logging.target = "file".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.directory");

        config.logging.directory = Some("/var/log/marin".into());
        assert!(validate(&config).is_ok());
    }
}
