use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::AppConfig;
use crate::database::Database;
use crate::datekey::{key_for, WeekWindow};
use crate::model::{
    hour_labels, ActionError, CellView, RemoveRepeatsOutcome, RepeatOutcome, WeekRow, WeekView,
};
use crate::reconcile;
use crate::session::Session;

/// Materializes week views from the store and routes every mutation through
/// the reconciliation rules. Holds no state of its own beyond the config.
#[derive(Debug, Clone)]
pub struct WeekService {
    config: AppConfig,
}

impl WeekService {
    pub fn new(config: AppConfig) -> Result<Self> {
        Database::initialize(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Pure projection of the store for one week: a row per display hour,
    /// a cell per day, defaulting to empty/unrepeated where nothing is
    /// stored.
    pub fn view_for(&self, week: WeekWindow) -> Result<WeekView> {
        let db = self.open_database()?;
        let dates = week.dates();

        let mut days = Vec::with_capacity(dates.len());
        for date in dates {
            days.push(db.load_day(&key_for(date))?);
        }

        let rows = hour_labels()
            .map(|label| WeekRow {
                cells: days
                    .iter()
                    .map(|slots| slots.get(&label).map(CellView::from).unwrap_or_default())
                    .collect(),
                hour_label: label,
            })
            .collect();

        Ok(WeekView {
            dates: dates.to_vec(),
            rows,
        })
    }

    /// Read-modify-write of a single slot under the plain-edit rule. An
    /// empty `text` writes an empty record; it does not remove the slot.
    pub fn apply_edit(&self, date: NaiveDate, hour_label: &str, text: &str) -> Result<()> {
        let db = self.open_database()?;
        let key = key_for(date);
        let mut slots = db.load_day(&key)?;
        let next = reconcile::edit(slots.get(hour_label), text);
        slots.insert(hour_label.to_string(), next);
        db.save_day(&key, &slots)
    }

    /// Fan `source_text` out to the same hour slot on every day of the week.
    /// Blank text is rejected before storage is touched. The text is trimmed
    /// first, matching what the edit surface displays. Idempotent.
    pub fn repeat_across_week(
        &self,
        source_text: &str,
        hour_label: &str,
        week: WeekWindow,
    ) -> Result<RepeatOutcome> {
        let text = source_text.trim();
        if text.is_empty() {
            return Err(ActionError::EmptySource.into());
        }

        let db = self.open_database()?;
        let dates = week.dates();
        for date in dates {
            let key = key_for(date);
            let mut slots = db.load_day(&key)?;
            slots.insert(hour_label.to_string(), reconcile::repeat(text));
            db.save_day(&key, &slots)?;
        }

        debug!(hour_label, "repeated slot across week");
        Ok(RepeatOutcome {
            hour_label: hour_label.to_string(),
            text: text.to_string(),
            days: dates.len(),
        })
    }

    /// Remove previously propagated content at `hour_label` on every day of
    /// the week. Manually entered slots stay untouched; a day left with no
    /// slots loses its stored key entirely.
    pub fn remove_repeated_across_week(
        &self,
        hour_label: &str,
        week: WeekWindow,
    ) -> Result<RemoveRepeatsOutcome> {
        let db = self.open_database()?;
        let mut removed = 0;
        for date in week.dates() {
            let key = key_for(date);
            let mut slots = db.load_day(&key)?;
            if reconcile::remove_repeated(&mut slots, hour_label) {
                db.save_day(&key, &slots)?;
                removed += 1;
            }
        }

        debug!(hour_label, removed, "removed repeated entries across week");
        Ok(RemoveRepeatsOutcome {
            hour_label: hour_label.to_string(),
            removed,
        })
    }

    /// Hard reset for the week: drop all seven keys unconditionally,
    /// bypassing per-slot reconciliation.
    pub fn clear_week(&self, week: WeekWindow) -> Result<()> {
        let db = self.open_database()?;
        db.remove_all(&week.keys())?;
        debug!(start = %week.start(), "cleared week");
        Ok(())
    }

    /// Repeat the session's selected cell across the displayed week, reading
    /// the source text from storage.
    pub fn repeat_selected(&self, session: &Session) -> Result<RepeatOutcome> {
        let cell = session.selected()?;
        let db = self.open_database()?;
        let slots = db.load_day(&key_for(cell.date))?;
        let text = slots
            .get(&cell.hour_label)
            .map(|record| record.text.clone())
            .unwrap_or_default();
        self.repeat_across_week(&text, &cell.hour_label, session.week())
    }

    /// Delete-repeats for the session's selected hour slot.
    pub fn remove_repeated_selected(&self, session: &Session) -> Result<RemoveRepeatsOutcome> {
        let cell = session.selected()?;
        self.remove_repeated_across_week(&cell.hour_label, session.week())
    }

    fn open_database(&self) -> Result<Database> {
        Database::initialize(&self.config)
    }
}
