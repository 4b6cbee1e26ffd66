use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;
use crate::domain::models::{lead::LeadSummary, person::Person};
use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct CalendarEntry {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub lead_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable part of an entry, replaced wholesale on edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub lead_id: Option<String>,
}

impl EntryFields {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid("title", "Title must not be empty"));
        }
        if self.start_time >= self.end_time {
            return Err(AppError::invalid("end_time", "End time must be after start time"));
        }
        Ok(())
    }
}

impl CalendarEntry {
    pub fn new(fields: EntryFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date: fields.date,
            title: fields.title.trim().to_string(),
            start_time: fields.start_time,
            end_time: fields.end_time,
            lead_id: fields.lead_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds the replacement row for an existing entry id.
    pub fn replacing(id: &str, fields: EntryFields) -> Self {
        Self {
            id: id.to_string(),
            ..Self::new(fields)
        }
    }
}

/// Entry row joined with the lead's display name.
#[derive(Debug, FromRow)]
pub struct EntryRow {
    #[sqlx(flatten)]
    pub entry: CalendarEntry,
    pub lead_name: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct AssignmentRow {
    pub entry_id: String,
    pub person_id: String,
}

/// An entry as the calendar reads it: participants resolved, lead labelled.
#[derive(Debug, Serialize, Clone)]
pub struct ScheduledEntry {
    #[serde(flatten)]
    pub entry: CalendarEntry,
    pub participants: Vec<Person>,
    pub lead: Option<LeadSummary>,
}

impl ScheduledEntry {
    pub fn has_participant(&self, person: Person) -> bool {
        self.participants.contains(&person)
    }

    /// Joins entry rows with their assignment rows, keeping row order.
    ///
    /// Entries left without any known participant are dropped: they must never
    /// show up in a per-person view.
    pub fn assemble(rows: Vec<EntryRow>, assignments: Vec<AssignmentRow>) -> Vec<ScheduledEntry> {
        let mut by_entry: HashMap<String, Vec<Person>> = HashMap::new();
        for row in assignments {
            match Person::from_id(&row.person_id) {
                Some(person) => by_entry.entry(row.entry_id).or_default().push(person),
                None => warn!("Ignoring assignment of unknown person '{}' on entry {}", row.person_id, row.entry_id),
            }
        }

        rows.into_iter()
            .filter_map(|row| {
                let mut participants = by_entry.remove(&row.entry.id).unwrap_or_default();
                if participants.is_empty() {
                    warn!("Entry {} has no participants, hiding it", row.entry.id);
                    return None;
                }
                participants.sort();
                participants.dedup();

                let lead = match (&row.entry.lead_id, row.lead_name) {
                    (Some(id), Some(display_name)) => Some(LeadSummary { id: id.clone(), display_name }),
                    _ => None,
                };

                Some(ScheduledEntry { entry: row.entry, participants, lead })
            })
            .collect()
    }
}

/// `HH:MM` on the wire. `HH:MM:SS` is accepted on input only with zero seconds,
/// so a stored time always reads back exactly as it was validated.
pub mod hhmm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
            .filter(|time| time.second() == 0 && time.nanosecond() == 0)
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time '{}'", raw)))
    }
}
