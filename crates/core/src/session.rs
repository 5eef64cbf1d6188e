//! Caller-owned UI session state: the displayed week and the last selected
//! cell. The rendering layer owns an instance and mutates it through these
//! calls only; nothing here touches storage.

use chrono::NaiveDate;

use crate::datekey::WeekWindow;
use crate::model::ActionError;

/// One selected grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub date: NaiveDate,
    pub hour_label: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    week: WeekWindow,
    selected: Option<CellRef>,
}

impl Session {
    /// Start on the week containing `today`, nothing selected.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            week: WeekWindow::containing(today),
            selected: None,
        }
    }

    pub fn week(&self) -> WeekWindow {
        self.week
    }

    pub fn select(&mut self, date: NaiveDate, hour_label: impl Into<String>) {
        self.selected = Some(CellRef {
            date,
            hour_label: hour_label.into(),
        });
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected cell, or the notice shown when a cell action is invoked
    /// without one.
    pub fn selected(&self) -> Result<&CellRef, ActionError> {
        self.selected.as_ref().ok_or(ActionError::NoCellSelected)
    }

    // Navigation rebuilds the grid, so any selection goes stale with it.

    pub fn next_week(&mut self) {
        self.week = self.week.next();
        self.selected = None;
    }

    pub fn prev_week(&mut self) {
        self.week = self.week.prev();
        self.selected = None;
    }

    /// Jump to the week containing the first day of the given month.
    /// Returns false (and stays put) for an out-of-range month.
    pub fn goto_month(&mut self, year: i32, month: u32) -> bool {
        match WeekWindow::for_month(year, month) {
            Some(week) => {
                self.week = week;
                self.selected = None;
                true
            }
            None => false,
        }
    }
}
