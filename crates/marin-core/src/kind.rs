//! Widget kinds and platform instance identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two independent widget types the host places on the home screen.
///
/// A kind decides which snapshot key is read, which slot schema is filled
/// and which placeholder text applies when data is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Vessel profile and current loading condition.
    Vessel,
    /// Most recent roll-period alerts.
    AlertHistory,
}

impl WidgetKind {
    /// Every kind, in a stable order.
    pub const ALL: [Self; 2] = [Self::Vessel, Self::AlertHistory];

    /// Stable lowercase name used in logs, config and the CLI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vessel => "vessel",
            Self::AlertHistory => "alert-history",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vessel" => Ok(Self::Vessel),
            "alert-history" | "alert_history" | "alerthistory" | "alert" => {
                Ok(Self::AlertHistory)
            },
            other => Err(format!(
                "unknown widget kind '{other}'; expected one of: vessel, alert-history"
            )),
        }
    }
}

/// Opaque identifier of one placed widget, owned by the host platform.
///
/// The pipeline never mints these; it only receives them from the
/// instance registry and hands them back to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetInstanceId(i32);

impl WidgetInstanceId {
    /// Wrap a raw platform identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw platform identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for WidgetInstanceId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for WidgetInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WidgetInstanceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
