//! Display slots and the slot mapper.
//!
//! A [`SlotSet`] is the complete text content of one widget surface. It is
//! built blank, filled from a [`ParseResult`] and then handed to a renderer.
//! Every slot always holds a string; there is no "unset" state.

use serde::Serialize;

use crate::format::format_decimal;
use crate::kind::WidgetKind;
use crate::snapshot::{AlertHistorySnapshot, ParseResult, Snapshot, VesselSnapshot};

/// Text of a slot that carries no data.
/// A single space, so an unfilled row keeps its line on the host.
pub const BLANK: &str = " ";

/// Title shown when the host has not written vessel data yet.
pub const NO_VESSEL_DATA: &str = "No vessel data";

/// Title shown when the stored snapshot could not be read.
pub const ERROR_LOADING_DATA: &str = "Error loading data";

/// Number of alert rows on the alert history widget.
pub const ALERT_ROWS: usize = 5;

/// Name of the title/status slot shared by both kinds.
pub const TITLE_SLOT: &str = "widget_title";

const VESSEL_SLOT_NAMES: [&str; 8] = [
    TITLE_SLOT,
    "vessel_name",
    "vessel_length",
    "vessel_beam",
    "vessel_depth",
    "condition_name",
    "condition_gm",
    "condition_vcg",
];

/// Title plus three slots per row.
const ALERT_HISTORY_SLOT_COUNT: usize = 16;

const ALERT_ROW_SLOT_NAMES: [[&str; 3]; ALERT_ROWS] = [
    ["alert1_time", "alert1_date", "alert1_roll"],
    ["alert2_time", "alert2_date", "alert2_roll"],
    ["alert3_time", "alert3_date", "alert3_roll"],
    ["alert4_time", "alert4_date", "alert4_roll"],
    ["alert5_time", "alert5_date", "alert5_roll"],
];

/// Slots of the vessel widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VesselSlots {
    /// Title/status line.
    pub title: String,
    /// Vessel name.
    pub name: String,
    /// `Length: <value> m`.
    pub length: String,
    /// `Beam: <value> m`.
    pub beam: String,
    /// `Depth: <value> m`.
    pub depth: String,
    /// Loading condition name.
    pub condition_name: String,
    /// `GM: <value> m`.
    pub condition_gm: String,
    /// `VCG: <value> m`.
    pub condition_vcg: String,
}

impl Default for VesselSlots {
    fn default() -> Self {
        Self {
            title: BLANK.to_owned(),
            name: BLANK.to_owned(),
            length: BLANK.to_owned(),
            beam: BLANK.to_owned(),
            depth: BLANK.to_owned(),
            condition_name: BLANK.to_owned(),
            condition_gm: BLANK.to_owned(),
            condition_vcg: BLANK.to_owned(),
        }
    }
}

impl VesselSlots {
    fn fill(&mut self, snapshot: &VesselSnapshot) {
        let profile = &snapshot.profile;
        let condition = &snapshot.condition;

        self.title = BLANK.to_owned();
        self.name.clone_from(&profile.name);
        self.length = metres("Length", profile.length);
        self.beam = metres("Beam", profile.beam);
        self.depth = metres("Depth", profile.depth);
        self.condition_name.clone_from(&condition.name);
        self.condition_gm = metres("GM", condition.gm);
        self.condition_vcg = metres("VCG", condition.vcg);
    }

    fn values(&self) -> [&str; 8] {
        [
            &self.title,
            &self.name,
            &self.length,
            &self.beam,
            &self.depth,
            &self.condition_name,
            &self.condition_gm,
            &self.condition_vcg,
        ]
    }
}

/// The three slots of one alert row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertRowSlots {
    /// Time of day.
    pub time: String,
    /// Date.
    pub date: String,
    /// Roll period.
    pub roll: String,
}

impl Default for AlertRowSlots {
    fn default() -> Self {
        Self {
            time: BLANK.to_owned(),
            date: BLANK.to_owned(),
            roll: BLANK.to_owned(),
        }
    }
}

/// Slots of the alert history widget: a title plus a fixed block of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertHistorySlots {
    /// Title/status line.
    pub title: String,
    /// Rows in display order. Always exactly [`ALERT_ROWS`] long.
    pub rows: [AlertRowSlots; ALERT_ROWS],
}

impl Default for AlertHistorySlots {
    fn default() -> Self {
        Self {
            title: BLANK.to_owned(),
            rows: Default::default(),
        }
    }
}

impl AlertHistorySlots {
    fn fill(&mut self, snapshot: &AlertHistorySnapshot) {
        // Entries past the last row are dropped.
        for (row, entry) in self.rows.iter_mut().zip(&snapshot.entries) {
            row.time.clone_from(&entry.time);
            row.date.clone_from(&entry.date);
            row.roll.clone_from(&entry.roll_period);
        }
    }
}

/// The complete text content of one widget surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "slots", rename_all = "kebab-case")]
pub enum SlotSet {
    /// Vessel widget slots.
    Vessel(VesselSlots),
    /// Alert history widget slots.
    AlertHistory(AlertHistorySlots),
}

impl SlotSet {
    /// A slot set for `kind` with every slot blank.
    #[must_use]
    pub fn blank(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Vessel => Self::Vessel(VesselSlots::default()),
            WidgetKind::AlertHistory => Self::AlertHistory(AlertHistorySlots::default()),
        }
    }

    /// The widget kind these slots belong to.
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Vessel(_) => WidgetKind::Vessel,
            Self::AlertHistory(_) => WidgetKind::AlertHistory,
        }
    }

    /// Text of the title/status slot.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Vessel(slots) => &slots.title,
            Self::AlertHistory(slots) => &slots.title,
        }
    }

    /// Every `(slot name, text)` pair in layout order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Vessel(slots) => VESSEL_SLOT_NAMES.into_iter().zip(slots.values()).collect(),
            Self::AlertHistory(slots) => {
                let mut entries = Vec::with_capacity(ALERT_HISTORY_SLOT_COUNT);
                entries.push((TITLE_SLOT, slots.title.as_str()));
                for (names, row) in ALERT_ROW_SLOT_NAMES.iter().zip(&slots.rows) {
                    entries.push((names[0], row.time.as_str()));
                    entries.push((names[1], row.date.as_str()));
                    entries.push((names[2], row.roll.as_str()));
                }
                entries
            },
        }
    }

    /// Text of the slot called `name`, if the kind has such a slot.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find_map(|(slot, text)| (slot == name).then_some(text))
    }

    /// Number of slots on this surface.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        Self::slot_count_for(self.kind())
    }

    /// Number of slots on a surface of `kind`.
    #[must_use]
    pub const fn slot_count_for(kind: WidgetKind) -> usize {
        match kind {
            WidgetKind::Vessel => VESSEL_SLOT_NAMES.len(),
            WidgetKind::AlertHistory => ALERT_HISTORY_SLOT_COUNT,
        }
    }

    /// Whether every slot, title included, is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries().iter().all(|(_, text)| *text == BLANK)
    }

    fn error(kind: WidgetKind) -> Self {
        let mut slots = Self::blank(kind);
        slots.set_title(ERROR_LOADING_DATA);
        slots
    }

    fn set_title(&mut self, text: &str) {
        let title = match self {
            Self::Vessel(slots) => &mut slots.title,
            Self::AlertHistory(slots) => &mut slots.title,
        };
        text.clone_into(title);
    }
}

/// Map a parse result onto the slots of `kind`.
///
/// Never fails. The set always starts blank, so an error never leaves
/// stale content next to the error title.
///
/// - `Absent`: vessel shows [`NO_VESSEL_DATA`]; alert history stays blank.
/// - `Invalid`: title shows [`ERROR_LOADING_DATA`], everything else blank.
/// - `Parsed`: content slots filled; alert rows filled in snapshot order,
///   at most [`ALERT_ROWS`] of them.
///
/// A parsed snapshot of the wrong kind is treated as invalid.
#[must_use]
pub fn map_slots(kind: WidgetKind, result: &ParseResult) -> SlotSet {
    let mut slots = SlotSet::blank(kind);

    match (result, &mut slots) {
        (ParseResult::Absent, SlotSet::Vessel(vessel)) => {
            NO_VESSEL_DATA.clone_into(&mut vessel.title);
        },
        (ParseResult::Absent, SlotSet::AlertHistory(_)) => {},
        (ParseResult::Parsed(Snapshot::Vessel(snapshot)), SlotSet::Vessel(vessel)) => {
            vessel.fill(snapshot);
        },
        (ParseResult::Parsed(Snapshot::AlertHistory(snapshot)), SlotSet::AlertHistory(history)) => {
            history.fill(snapshot);
        },
        (ParseResult::Invalid(_) | ParseResult::Parsed(_), _) => {
            return SlotSet::error(kind);
        },
    }

    slots
}

fn metres(label: &str, value: f64) -> String {
    format!("{label}: {} m", format_decimal(value))
}
