use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First and last hour slots shown on the grid (inclusive).
pub const START_HOUR: u32 = 4;
pub const END_HOUR: u32 = 21;

/// Persisted content of one (date, hour) cell. The `repeated` flag marks
/// text that was last written by week propagation; a plain edit carries the
/// flag forward and only delete-repeats clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub text: String,
    pub repeated: bool,
}

impl TaskRecord {
    pub fn manual(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            repeated: false,
        }
    }
}

/// Stored slot value as found on disk: the current record form, or the bare
/// string an earlier format wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredSlot {
    Record(TaskRecord),
    Legacy(String),
}

impl From<StoredSlot> for TaskRecord {
    fn from(slot: StoredSlot) -> Self {
        match slot {
            StoredSlot::Record(record) => record,
            StoredSlot::Legacy(text) => TaskRecord {
                text,
                repeated: false,
            },
        }
    }
}

/// One day's slots, keyed by hour label ("4:00" through "21:00").
pub type DayRecordSet = BTreeMap<String, TaskRecord>;

pub fn hour_label(hour: u32) -> String {
    format!("{}:00", hour)
}

/// Labels for every display row, in grid order.
pub fn hour_labels() -> impl Iterator<Item = String> {
    (START_HOUR..=END_HOUR).map(hour_label)
}

/// Parse "9:00" (or bare "9") into an hour within the display range.
pub fn parse_hour_label(raw: &str) -> Option<u32> {
    let hour: u32 = match raw.split_once(':') {
        Some((hour, "00")) => hour.parse().ok()?,
        Some(_) => return None,
        None => raw.parse().ok()?,
    };
    (START_HOUR..=END_HOUR).contains(&hour).then_some(hour)
}

/// What the rendering layer sees for one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub text: String,
    pub repeated: bool,
}

impl From<&TaskRecord> for CellView {
    fn from(record: &TaskRecord) -> Self {
        Self {
            text: record.text.clone(),
            repeated: record.repeated,
        }
    }
}

/// One grid row: an hour slot across all seven days.
#[derive(Debug, Clone, Serialize)]
pub struct WeekRow {
    pub hour_label: String,
    pub cells: Vec<CellView>,
}

/// Full projection of a week window, a row per display hour.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<WeekRow>,
}

impl WeekView {
    pub fn cell(&self, hour: u32, day_index: usize) -> Option<&CellView> {
        let label = hour_label(hour);
        self.rows
            .iter()
            .find(|row| row.hour_label == label)
            .and_then(|row| row.cells.get(day_index))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RepeatOutcome {
    pub hour_label: String,
    pub text: String,
    pub days: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveRepeatsOutcome {
    pub hour_label: String,
    pub removed: usize,
}

/// Precondition failures surfaced to the user as blocking notices. None of
/// these leave any stored state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Please click on a task cell first.")]
    NoCellSelected,
    #[error("Selected cell is empty.")]
    EmptySource,
}
