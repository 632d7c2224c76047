//! Conversion from the `[logging]` config section.

use marin_config::LoggingSection;

use crate::error::{TelemetryError, TelemetryResult};
use crate::logging::{FileRotation, LogConfig, LogFormat, LogTarget};

fn target(section: &LoggingSection) -> TelemetryResult<LogTarget> {
    match (section.target.as_str(), &section.directory) {
        ("stderr", _) => Ok(LogTarget::Stderr),
        ("stdout", _) => Ok(LogTarget::Stdout),
        ("file", Some(dir)) => Ok(LogTarget::File(dir.clone())),
        ("file", None) => Err(TelemetryError::ConfigError(
            "file logging needs logging.directory".to_owned(),
        )),
        (other, _) => Err(TelemetryError::ConfigError(format!(
            "unknown log target '{other}'"
        ))),
    }
}

impl TryFrom<&LoggingSection> for LogConfig {
    type Error = TelemetryError;

    fn try_from(section: &LoggingSection) -> TelemetryResult<Self> {
        let format: LogFormat = section.format.parse()?;
        let rotation: FileRotation = section.rotation.parse()?;

        let base = Self::new(&section.level).with_format(format);
        let base = match target(section)? {
            LogTarget::File(dir) => base.with_file_logging(dir, rotation),
            other => base.with_target(other),
        };

        Ok(section
            .directives
            .iter()
            .fold(base, |config, directive| config.with_directive(directive)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_from_default_section() {
        let config = LogConfig::try_from(&LoggingSection::default()).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.ansi);
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_from_custom_section() {
        let section = LoggingSection {
            level: "debug".to_owned(),
            format: "json".to_owned(),
            directives: vec!["marin_storage=trace".to_owned()],
            target: "stdout".to_owned(),
            ..LoggingSection::default()
        };
        let config = LogConfig::try_from(&section).unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target, LogTarget::Stdout);
        assert_eq!(config.directives, vec!["marin_storage=trace"]);
    }

    #[test]
    fn test_file_section_maps_directory_and_rotation() {
        let section = LoggingSection {
            target: "file".to_owned(),
            directory: Some(PathBuf::from("/var/log/marin")),
            rotation: "hourly".to_owned(),
            ..LoggingSection::default()
        };
        let config = LogConfig::try_from(&section).unwrap();
        assert_eq!(config.target, LogTarget::File(PathBuf::from("/var/log/marin")));
        assert_eq!(config.rotation, FileRotation::Hourly);
        assert!(!config.ansi);
    }

    #[test]
    fn test_file_section_without_directory_is_rejected() {
        let section = LoggingSection {
            target: "file".to_owned(),
            ..LoggingSection::default()
        };
        assert!(matches!(
            LogConfig::try_from(&section),
            Err(TelemetryError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let section = LoggingSection {
            format: "yaml".to_owned(),
            ..LoggingSection::default()
        };
        assert!(LogConfig::try_from(&section).is_err());
    }

    #[test]
    fn test_unknown_target_and_rotation_are_rejected() {
        let section = LoggingSection {
            target: "syslog".to_owned(),
            ..LoggingSection::default()
        };
        assert!(LogConfig::try_from(&section).is_err());

        let section = LoggingSection {
            rotation: "weekly".to_owned(),
            ..LoggingSection::default()
        };
        assert!(LogConfig::try_from(&section).is_err());
    }
}
