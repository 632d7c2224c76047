//! Configuration struct definitions.
//!
//! Every section implements [`Default`] with the same values as the
//! embedded `defaults.toml`, so a partially written file deserializes to a
//! complete configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where snapshots are read from.
    pub store: StoreSection,
    /// Platform broadcast action ids.
    pub events: EventsSection,
    /// Host command bindings.
    pub commands: CommandsSection,
    /// Logging level and format.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// StoreSection
// ---------------------------------------------------------------------------

/// Snapshot store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Namespace prepended to every key. May be empty.
    pub prefix: String,
    /// Key holding the vessel snapshot.
    pub vessel_key: String,
    /// Key holding the alert history snapshot.
    pub alert_history_key: String,
    /// Host preference file to read from. `None` means the caller supplies
    /// the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefs_path: Option<PathBuf>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            prefix: "flutter.".to_owned(),
            vessel_key: "vesselData".to_owned(),
            alert_history_key: "alertHistoryData".to_owned(),
            prefs_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// EventsSection
// ---------------------------------------------------------------------------

/// Broadcast action ids the dispatcher reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsSection {
    /// Refresh action of the vessel widget.
    pub vessel_refresh_action: String,
    /// Refresh action of the alert history widget.
    pub alert_refresh_action: String,
    /// The platform's generic widget update action.
    pub update_action: String,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            vessel_refresh_action: "com.example.marin.REFRESH_VESSEL_WIDGET".to_owned(),
            alert_refresh_action: "com.marin.rollperiod.REFRESH_ACTION".to_owned(),
            update_action: "android.appwidget.action.APPWIDGET_UPDATE".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// CommandsSection
// ---------------------------------------------------------------------------

/// Host command bindings, one per widget kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsSection {
    /// Refreshes the vessel widget.
    pub vessel: CommandBinding,
    /// Refreshes the alert history widget.
    pub alert_history: CommandBinding,
}

impl Default for CommandsSection {
    fn default() -> Self {
        Self {
            vessel: CommandBinding::new("com.marin.rollperiod/vessel_widget", "updateVesselWidget"),
            alert_history: CommandBinding::new("com.marin.rollperiod/widget", "updateWidget"),
        }
    }
}

/// A `(channel, method)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandBinding {
    /// Channel name.
    pub channel: String,
    /// Method name.
    pub method: String,
}

impl CommandBinding {
    /// Create a binding.
    pub fn new(channel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            method: method.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"` or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["marin_dispatch=debug"]`).
    pub directives: Vec<String>,
    /// Where log lines go: `"stderr"`, `"stdout"` or `"file"`.
    pub target: String,
    /// Log directory. Required when `target` is `"file"`.
    pub directory: Option<PathBuf>,
    /// Log file rollover: `"daily"`, `"hourly"` or `"never"`.
    pub rotation: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
            target: "stderr".to_owned(),
            directory: None,
            rotation: "daily".to_owned(),
        }
    }
}
