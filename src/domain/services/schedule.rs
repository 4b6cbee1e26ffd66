use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::models::{entry::ScheduledEntry, person::Person};
use crate::domain::services::{conflicts::flag_conflicts, week::WeekWindow};

#[derive(Debug, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct CellEntry {
    #[serde(flatten)]
    pub entry: ScheduledEntry,
    pub conflict: bool,
}

#[derive(Debug, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub entries: Vec<CellEntry>,
}

#[derive(Debug, Serialize)]
pub struct PersonRow {
    pub person: Person,
    pub cells: Vec<DayCell>,
}

#[derive(Debug, Serialize)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub days: Vec<DayHeader>,
    pub rows: Vec<PersonRow>,
}

impl WeekSchedule {
    pub fn cell(&self, person: Person, date: NaiveDate) -> Option<&DayCell> {
        self.rows
            .iter()
            .find(|r| r.person == person)?
            .cells
            .iter()
            .find(|c| c.date == date)
    }
}

/// Lays out one week as a roster × day grid, flagging per-person overlaps.
pub fn build_week_schedule(window: &WeekWindow, entries: &[ScheduledEntry], today: NaiveDate) -> WeekSchedule {
    let days = window
        .days()
        .iter()
        .map(|&date| DayHeader { date, is_today: date == today })
        .collect();

    let rows = Person::ALL
        .into_iter()
        .map(|person| {
            let cells = window
                .days()
                .iter()
                .map(|&date| {
                    let mut mine: Vec<&ScheduledEntry> = entries
                        .iter()
                        .filter(|e| e.entry.date == date && e.has_participant(person))
                        .collect();
                    mine.sort_by_key(|e| (e.entry.start_time, e.entry.end_time));

                    let flags = flag_conflicts(&mine);
                    let entries = mine
                        .into_iter()
                        .zip(flags)
                        .map(|(entry, conflict)| CellEntry { entry: entry.clone(), conflict })
                        .collect();

                    DayCell { date, entries }
                })
                .collect();

            PersonRow { person, cells }
        })
        .collect();

    WeekSchedule {
        week_start: window.start(),
        week_end: window.end(),
        days,
        rows,
    }
}
