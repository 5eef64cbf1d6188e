//! Date-to-storage-key codec and week-window arithmetic.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Every persisted day lives under `taskData-YYYY-MM-DD`.
pub const KEY_PREFIX: &str = "taskData-";

pub fn key_for(date: NaiveDate) -> String {
    format!("{}{}", KEY_PREFIX, date.format("%Y-%m-%d"))
}

pub fn date_for_key(key: &str) -> Option<NaiveDate> {
    let raw = key.strip_prefix(KEY_PREFIX)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// The Sunday on or before `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// Seven consecutive dates starting on a Sunday. Derived on demand, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The window containing `date`, snapped back to its Sunday.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: week_start_of(date),
        }
    }

    /// The window containing the first day of the given month, if valid.
    pub fn for_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|offset| self.start + Days::new(offset as u64))
    }

    pub fn keys(&self) -> Vec<String> {
        self.dates().iter().map(|date| key_for(*date)).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.start + Days::new(7)
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Days::new(7),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            start: self.start - Days::new(7),
        }
    }
}

/// "16 Jun - 30 Jun (Left-15)" style summary of the rest of the month.
pub fn month_summary(today: NaiveDate) -> String {
    let end = month_end(today);
    let left = (end - today).num_days() + 1;
    format!(
        "{} - {} (Left-{})",
        today.format("%-d %b"),
        end.format("%-d %b"),
        left
    )
}

fn month_end(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .map(|next_month| next_month - Days::new(1))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn key_round_trips_through_date() {
        let day = date(2025, 6, 16);
        let key = key_for(day);
        assert_eq!(key, "taskData-2025-06-16");
        assert_eq!(date_for_key(&key), Some(day));
        assert_eq!(date_for_key("darkModeEnabled"), None);
    }

    #[test]
    fn week_start_snaps_back_to_sunday() {
        // 2025-06-16 is a Monday.
        assert_eq!(week_start_of(date(2025, 6, 16)), date(2025, 6, 15));
        // Sundays are their own week start.
        assert_eq!(week_start_of(date(2025, 6, 15)), date(2025, 6, 15));
    }

    #[test]
    fn window_spans_seven_consecutive_days() {
        let window = WeekWindow::containing(date(2025, 6, 18));
        let dates = window.dates();
        assert_eq!(dates[0], date(2025, 6, 15));
        assert_eq!(dates[6], date(2025, 6, 21));
        assert!(dates.iter().all(|d| window.contains(*d)));
        assert!(!window.contains(date(2025, 6, 22)));
        assert_eq!(dates[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn navigation_shifts_by_whole_weeks() {
        let window = WeekWindow::containing(date(2025, 6, 15));
        assert_eq!(window.next().start(), date(2025, 6, 22));
        assert_eq!(window.prev().start(), date(2025, 6, 8));
        assert_eq!(window.next().prev(), window);
    }

    #[test]
    fn month_window_contains_the_first() {
        let window = WeekWindow::for_month(2025, 6).expect("valid month");
        assert!(window.contains(date(2025, 6, 1)));
        assert_eq!(window.start().weekday(), Weekday::Sun);
        assert!(WeekWindow::for_month(2025, 13).is_none());
    }

    #[test]
    fn month_summary_counts_remaining_days() {
        assert_eq!(month_summary(date(2025, 6, 16)), "16 Jun - 30 Jun (Left-15)");
        assert_eq!(month_summary(date(2025, 6, 30)), "30 Jun - 30 Jun (Left-1)");
        // December rolls the year over when finding the month end.
        assert_eq!(
            month_summary(date(2025, 12, 30)),
            "30 Dec - 31 Dec (Left-2)"
        );
    }
}
