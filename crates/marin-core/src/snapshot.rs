//! Snapshot types and the snapshot parser.
//!
//! The host writes one JSON document per widget kind. Field names are
//! load-bearing: they are shared with the host's serializer.
//!
//! Vessel:
//!
//! ```json
//! {"vesselProfile": {"name": "Marin I", "length": 12.5, "beam": 4.0, "depth": 1.8},
//!  "loadingCondition": {"name": "Departure", "gm": 1.2, "vcg": 3.1}}
//! ```
//!
//! Alert history:
//!
//! ```json
//! {"alertHistory": [{"time": "10:42", "date": "2024-05-01", "rollPeriod": "7.8 s"}]}
//! ```
//!
//! Validation is all-or-nothing. Every required field must be present with
//! the right JSON type; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};
use crate::kind::WidgetKind;

/// Dimensions of the vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselProfile {
    /// Vessel name.
    pub name: String,
    /// Length in metres.
    pub length: f64,
    /// Beam in metres.
    pub beam: f64,
    /// Depth in metres.
    pub depth: f64,
}

/// The loading condition currently selected on the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingCondition {
    /// Condition name.
    pub name: String,
    /// Metacentric height in metres.
    pub gm: f64,
    /// Vertical centre of gravity in metres.
    pub vcg: f64,
}

/// Vessel profile plus loading condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    /// Vessel dimensions.
    #[serde(rename = "vesselProfile")]
    pub profile: VesselProfile,
    /// Current loading condition.
    #[serde(rename = "loadingCondition")]
    pub condition: LoadingCondition,
}

/// One recorded roll-period alert. All fields are preformatted by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Time of day the alert fired.
    pub time: String,
    /// Date the alert fired.
    pub date: String,
    /// Roll period at the time of the alert.
    #[serde(rename = "rollPeriod")]
    pub roll_period: String,
}

/// Alert history in the order the host wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AlertHistorySnapshot {
    /// Entries, most relevant first. Never re-sorted here.
    #[serde(rename = "alertHistory")]
    pub entries: Vec<AlertEntry>,
}

/// A validated snapshot of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Vessel snapshot.
    Vessel(VesselSnapshot),
    /// Alert history snapshot.
    AlertHistory(AlertHistorySnapshot),
}

impl Snapshot {
    /// The widget kind this snapshot belongs to.
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Vessel(_) => WidgetKind::Vessel,
            Self::AlertHistory(_) => WidgetKind::AlertHistory,
        }
    }
}

/// Outcome of parsing a stored snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    /// Nothing stored under the key.
    Absent,
    /// Something stored, but it failed validation.
    Invalid(SnapshotError),
    /// A fully validated snapshot.
    Parsed(Snapshot),
}

impl ParseResult {
    /// Whether the result is [`ParseResult::Invalid`].
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Parse the raw stored string for `kind`.
///
/// `None` means the key was never written (or was cleared) and yields
/// [`ParseResult::Absent`]. Any present string that is not a well-formed,
/// schema-conforming document for `kind` yields [`ParseResult::Invalid`],
/// including the empty string. This function never panics.
#[must_use]
pub fn parse_snapshot(kind: WidgetKind, raw: Option<&str>) -> ParseResult {
    let Some(raw) = raw else {
        return ParseResult::Absent;
    };

    let parsed = match kind {
        WidgetKind::Vessel => parse_vessel(raw).map(Snapshot::Vessel),
        WidgetKind::AlertHistory => parse_alert_history(raw).map(Snapshot::AlertHistory),
    };

    match parsed {
        Ok(snapshot) => ParseResult::Parsed(snapshot),
        Err(e) => {
            debug!(kind = %kind, error = %e, "Rejected stored snapshot");
            ParseResult::Invalid(e)
        },
    }
}

fn parse_vessel(raw: &str) -> SnapshotResult<VesselSnapshot> {
    let document = parse_document(raw)?;

    let profile = require_object(&document, "", "vesselProfile")?;
    let condition = require_object(&document, "", "loadingCondition")?;

    Ok(VesselSnapshot {
        profile: VesselProfile {
            name: require_string(profile, "vesselProfile", "name")?,
            length: require_number(profile, "vesselProfile", "length")?,
            beam: require_number(profile, "vesselProfile", "beam")?,
            depth: require_number(profile, "vesselProfile", "depth")?,
        },
        condition: LoadingCondition {
            name: require_string(condition, "loadingCondition", "name")?,
            gm: require_number(condition, "loadingCondition", "gm")?,
            vcg: require_number(condition, "loadingCondition", "vcg")?,
        },
    })
}

fn parse_alert_history(raw: &str) -> SnapshotResult<AlertHistorySnapshot> {
    let document = parse_document(raw)?;

    let items = match document.get("alertHistory") {
        None | Some(Value::Null) => {
            return Err(SnapshotError::MissingField {
                path: "alertHistory".to_owned(),
            });
        },
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SnapshotError::WrongType {
                path: "alertHistory".to_owned(),
                expected: "an array",
            });
        },
    };

    let entries = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let path = format!("alertHistory[{index}]");
            let Value::Object(entry) = item else {
                return Err(SnapshotError::WrongType {
                    path,
                    expected: "an object",
                });
            };
            Ok(AlertEntry {
                time: require_string(entry, &path, "time")?,
                date: require_string(entry, &path, "date")?,
                roll_period: require_string(entry, &path, "rollPeriod")?,
            })
        })
        .collect::<SnapshotResult<Vec<_>>>()?;

    Ok(AlertHistorySnapshot { entries })
}

/// Parse `raw` as JSON and require a top-level object.
fn parse_document(raw: &str) -> SnapshotResult<Map<String, Value>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SnapshotError::WrongType {
            path: "$".to_owned(),
            expected: "an object",
        }),
    }
}

fn field_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}

fn require<'a>(
    map: &'a Map<String, Value>,
    parent: &str,
    field: &str,
) -> SnapshotResult<&'a Value> {
    match map.get(field) {
        None | Some(Value::Null) => Err(SnapshotError::MissingField {
            path: field_path(parent, field),
        }),
        Some(value) => Ok(value),
    }
}

fn require_object<'a>(
    map: &'a Map<String, Value>,
    parent: &str,
    field: &str,
) -> SnapshotResult<&'a Map<String, Value>> {
    require(map, parent, field)?
        .as_object()
        .ok_or_else(|| SnapshotError::WrongType {
            path: field_path(parent, field),
            expected: "an object",
        })
}

fn require_string(map: &Map<String, Value>, parent: &str, field: &str) -> SnapshotResult<String> {
    require(map, parent, field)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| SnapshotError::WrongType {
            path: field_path(parent, field),
            expected: "a string",
        })
}

fn require_number(map: &Map<String, Value>, parent: &str, field: &str) -> SnapshotResult<f64> {
    require(map, parent, field)?
        .as_f64()
        .ok_or_else(|| SnapshotError::WrongType {
            path: field_path(parent, field),
            expected: "a number",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const VESSEL: &str = r#"{
        "vesselProfile": {"name": "Marin I", "length": 12.5, "beam": 4.0, "depth": 1.8},
        "loadingCondition": {"name": "Departure", "gm": 1.2, "vcg": 3.1}
    }"#;

    fn vessel(raw: &str) -> ParseResult {
        parse_snapshot(WidgetKind::Vessel, Some(raw))
    }

    fn alerts(raw: &str) -> ParseResult {
        parse_snapshot(WidgetKind::AlertHistory, Some(raw))
    }

    #[test]
    fn test_absent_when_no_value() {
        assert_eq!(parse_snapshot(WidgetKind::Vessel, None), ParseResult::Absent);
        assert_eq!(
            parse_snapshot(WidgetKind::AlertHistory, None),
            ParseResult::Absent
        );
    }

    #[test]
    fn test_valid_vessel() {
        let ParseResult::Parsed(Snapshot::Vessel(snapshot)) = vessel(VESSEL) else {
            panic!("expected a vessel snapshot");
        };
        assert_eq!(snapshot.profile.name, "Marin I");
        assert!((snapshot.profile.length - 12.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.condition.name, "Departure");
        assert!((snapshot.condition.vcg - 3.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_integer_numbers_are_accepted() {
        let raw = r#"{"vesselProfile": {"name": "A", "length": 12, "beam": 4, "depth": 2},
                      "loadingCondition": {"name": "B", "gm": 1, "vcg": 3}}"#;
        assert!(matches!(vessel(raw), ParseResult::Parsed(_)));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = r#"{"vesselProfile": {"name": "A", "length": 1, "beam": 1, "depth": 1,
                                        "imo": "9"},
                      "loadingCondition": {"name": "B", "gm": 1, "vcg": 3},
                      "savedAt": "2024-05-01"}"#;
        assert!(matches!(vessel(raw), ParseResult::Parsed(_)));
    }

    #[test]
    fn test_empty_string_is_invalid() {
        assert!(vessel("").is_invalid());
        assert!(alerts("").is_invalid());
    }

    #[test]
    fn test_missing_field_is_reported_with_path() {
        let raw = r#"{"vesselProfile": {"name": "A", "length": 1, "beam": 1},
                      "loadingCondition": {"name": "B", "gm": 1, "vcg": 3}}"#;
        assert_eq!(
            vessel(raw),
            ParseResult::Invalid(SnapshotError::MissingField {
                path: "vesselProfile.depth".to_owned()
            })
        );
    }

    #[test]
    fn test_string_where_number_required_is_invalid() {
        let raw = r#"{"vesselProfile": {"name": "A", "length": "12.5", "beam": 1, "depth": 1},
                      "loadingCondition": {"name": "B", "gm": 1, "vcg": 3}}"#;
        assert_eq!(
            vessel(raw),
            ParseResult::Invalid(SnapshotError::WrongType {
                path: "vesselProfile.length".to_owned(),
                expected: "a number",
            })
        );
    }

    #[test]
    fn test_null_field_is_missing() {
        let raw =
            r#"{"vesselProfile": null, "loadingCondition": {"name": "B", "gm": 1, "vcg": 3}}"#;
        assert!(matches!(
            vessel(raw),
            ParseResult::Invalid(SnapshotError::MissingField { .. })
        ));
    }

    #[test]
    fn test_top_level_array_is_invalid() {
        assert!(vessel(r#"[{"name": "A"}]"#).is_invalid());
        assert!(alerts("[]").is_invalid());
    }

    #[test]
    fn test_trailing_garbage_is_invalid() {
        assert!(alerts(r#"{"alertHistory": []} trailing"#).is_invalid());
    }

    #[test]
    fn test_alert_history_keeps_order() {
        let raw = r#"{"alertHistory": [
            {"time": "10:00", "date": "d1", "rollPeriod": "7.1 s"},
            {"time": "09:00", "date": "d2", "rollPeriod": "7.2 s"}
        ]}"#;
        let ParseResult::Parsed(Snapshot::AlertHistory(snapshot)) = alerts(raw) else {
            panic!("expected an alert history snapshot");
        };
        let times: Vec<_> = snapshot.entries.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, ["10:00", "09:00"]);
        assert_eq!(snapshot.entries[1].roll_period, "7.2 s");
    }

    #[test]
    fn test_empty_alert_history_is_valid() {
        assert_eq!(
            alerts(r#"{"alertHistory": []}"#),
            ParseResult::Parsed(Snapshot::AlertHistory(AlertHistorySnapshot::default()))
        );
    }

    #[test]
    fn test_any_bad_alert_entry_rejects_the_whole_history() {
        let raw = r#"{"alertHistory": [
            {"time": "10:00", "date": "d1", "rollPeriod": "7.1 s"},
            {"time": "09:00", "date": "d2", "rollPeriod": 7.2}
        ]}"#;
        assert_eq!(
            alerts(raw),
            ParseResult::Invalid(SnapshotError::WrongType {
                path: "alertHistory[1].rollPeriod".to_owned(),
                expected: "a string",
            })
        );
    }

    #[test]
    fn test_payload_of_other_kind_is_invalid() {
        assert!(alerts(VESSEL).is_invalid());
        assert!(vessel(r#"{"alertHistory": []}"#).is_invalid());
    }

    #[test]
    fn test_random_garbage_is_always_invalid() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2_000 {
            let len = rng.gen_range(0..64);
            let garbage: String = (0..len).map(|_| rng.r#gen::<char>()).collect();
            for kind in WidgetKind::ALL {
                let result = parse_snapshot(kind, Some(&garbage));
                assert!(
                    result.is_invalid(),
                    "garbage {garbage:?} parsed as {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_truncated_documents_are_always_invalid() {
        // Every strict prefix of a valid document is malformed JSON.
        for end in 0..VESSEL.trim_end().len() {
            if let Some(prefix) = VESSEL.get(..end) {
                assert!(vessel(prefix).is_invalid(), "prefix {prefix:?} was accepted");
            }
        }
    }

    #[test]
    fn test_byte_mutations_never_panic() {
        let mut rng = StdRng::seed_from_u64(7);
        let original = VESSEL.as_bytes();
        for _ in 0..2_000 {
            let mut bytes = original.to_vec();
            let flips = rng.gen_range(1..4);
            for _ in 0..flips {
                let at = rng.gen_range(0..bytes.len());
                bytes[at] = rng.r#gen();
            }
            let mutated = String::from_utf8_lossy(&bytes);
            // Mutations may still be valid; they must simply resolve cleanly.
            let _ = parse_snapshot(WidgetKind::Vessel, Some(&mutated));
            let _ = parse_snapshot(WidgetKind::AlertHistory, Some(&mutated));
        }
    }
}
