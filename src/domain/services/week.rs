use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Seven consecutive calendar days, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    days: [NaiveDate; 7],
}

impl WeekWindow {
    pub fn start(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(&self) -> NaiveDate {
        self.days[6]
    }

    pub fn days(&self) -> &[NaiveDate; 7] {
        &self.days
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    pub fn shifted(&self, weeks: i64) -> WeekWindow {
        week_of(shift(self.start(), weeks))
    }
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    moved.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// The week containing `reference`.
///
/// Pure calendar-day arithmetic: month, year and DST boundaries cannot move
/// a day because no wall-clock time is involved.
pub fn week_of(reference: NaiveDate) -> WeekWindow {
    let monday = monday_of(reference);
    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = add_days(monday, offset as i64);
    }
    WeekWindow { days }
}

/// Moves a week start by whole weeks. The result is always a Monday, even
/// when `week_start` is not.
pub fn shift(week_start: NaiveDate, weeks: i64) -> NaiveDate {
    add_days(monday_of(week_start), weeks.saturating_mul(7))
}
