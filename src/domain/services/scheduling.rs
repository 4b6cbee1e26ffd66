use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{info, warn};
use crate::domain::{
    models::{
        entry::{CalendarEntry, EntryFields, ScheduledEntry},
        lead::LeadSummary,
        person::Person,
    },
    ports::{EntryRepository, LeadDirectory},
    services::{
        schedule::{build_week_schedule, WeekSchedule},
        week::week_of,
    },
};
use crate::error::AppError;

/// Resolves submitted participant ids against the roster.
///
/// The set must be non-empty and every id must be a roster member; duplicates
/// collapse. The result is in roster order.
pub fn resolve_participants(ids: &[String]) -> Result<Vec<Person>, AppError> {
    if ids.is_empty() {
        return Err(AppError::invalid("participants", "At least one participant is required"));
    }

    let mut people = ids
        .iter()
        .map(|id| id.parse::<Person>().map_err(|e| AppError::invalid("participants", e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    people.sort();
    people.dedup();
    Ok(people)
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    if from > to {
        return Err(AppError::invalid("to", "Range end must not be before its start"));
    }
    Ok(())
}

/// Entry point for every calendar read and write.
///
/// Reads degrade to an empty result when the store fails so the calendar
/// always renders; writes always surface their failure.
pub struct SchedulingService {
    entries: Arc<dyn EntryRepository>,
    leads: Arc<dyn LeadDirectory>,
}

impl SchedulingService {
    pub fn new(entries: Arc<dyn EntryRepository>, leads: Arc<dyn LeadDirectory>) -> Self {
        Self { entries, leads }
    }

    pub async fn list_entries(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError> {
        check_range(from, to)?;
        Ok(self.entries.list_range(from, to).await.unwrap_or_else(|e| {
            warn!("Listing entries {}..{} failed, serving empty calendar: {}", from, to, e);
            Vec::new()
        }))
    }

    pub async fn get_entry(&self, id: &str) -> Result<ScheduledEntry, AppError> {
        self.entries.find_by_id(id).await?
            .ok_or(AppError::NotFound("Entry not found".into()))
    }

    pub async fn create_entry(&self, fields: EntryFields, participant_ids: &[String]) -> Result<String, AppError> {
        let participants = self.validate(&fields, participant_ids).await?;
        let entry = CalendarEntry::new(fields);

        self.entries.create(&entry, &participants).await?;
        info!("Created entry {} on {} for {} participant(s)", entry.id, entry.date, participants.len());
        Ok(entry.id)
    }

    pub async fn update_entry(&self, id: &str, fields: EntryFields, participant_ids: &[String]) -> Result<(), AppError> {
        let participants = self.validate(&fields, participant_ids).await?;
        let entry = CalendarEntry::replacing(id, fields);

        self.entries.update(&entry, &participants).await?;
        info!("Updated entry {} on {} for {} participant(s)", entry.id, entry.date, participants.len());
        Ok(())
    }

    pub async fn delete_entry(&self, id: &str) -> Result<(), AppError> {
        if self.entries.delete(id).await? {
            info!("Deleted entry {}", id);
        } else {
            info!("Delete of unknown entry {} ignored", id);
        }
        Ok(())
    }

    pub async fn assignments_for(&self, entry_id: &str) -> Result<Vec<Person>, AppError> {
        let people = self.entries.assignments_for(entry_id).await?;
        if people.is_empty() {
            return Err(AppError::NotFound("Entry not found".into()));
        }
        Ok(people)
    }

    pub async fn entries_for(&self, person_id: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError> {
        let person = person_id.parse::<Person>()
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        check_range(from, to)?;

        Ok(self.entries.list_for_person(person, from, to).await.unwrap_or_else(|e| {
            warn!("Listing entries of {} failed, serving empty calendar: {}", person.id(), e);
            Vec::new()
        }))
    }

    pub async fn entries_for_lead(&self, lead_id: &str) -> Result<Vec<ScheduledEntry>, AppError> {
        Ok(self.entries.list_for_lead(lead_id).await.unwrap_or_else(|e| {
            warn!("Listing entries of lead {} failed: {}", lead_id, e);
            Vec::new()
        }))
    }

    pub async fn list_leads(&self) -> Vec<LeadSummary> {
        self.leads.list().await.unwrap_or_else(|e| {
            warn!("Listing leads failed, serving empty selector: {}", e);
            Vec::new()
        })
    }

    /// Deletion hook for the leads subsystem; entries lose the link, not their life.
    pub async fn delete_lead(&self, lead_id: &str) -> Result<(), AppError> {
        if self.leads.delete(lead_id).await? {
            info!("Deleted lead {} and detached its entries", lead_id);
        }
        Ok(())
    }

    pub async fn week_schedule(&self, reference: NaiveDate, offset: i64, today: NaiveDate) -> Result<WeekSchedule, AppError> {
        let window = week_of(reference).shifted(offset);
        let entries = self.list_entries(window.start(), window.end()).await?;
        Ok(build_week_schedule(&window, &entries, today))
    }

    async fn validate(&self, fields: &EntryFields, participant_ids: &[String]) -> Result<Vec<Person>, AppError> {
        fields.validate()?;
        let participants = resolve_participants(participant_ids)?;

        if let Some(lead_id) = &fields.lead_id
            && self.leads.find_by_id(lead_id).await?.is_none()
        {
            return Err(AppError::invalid("lead_id", format!("Lead '{}' does not exist", lead_id)));
        }

        Ok(participants)
    }
}
