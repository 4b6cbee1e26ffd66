use crate::domain::models::{
    entry::{CalendarEntry, ScheduledEntry},
    lead::LeadSummary,
    person::Person,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence boundary for calendar entries and their participant assignments.
///
/// Every write runs as a single transaction: an entry is never observable
/// without its participants.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ScheduledEntry>, AppError>;
    async fn create(&self, entry: &CalendarEntry, participants: &[Person]) -> Result<(), AppError>;
    async fn update(&self, entry: &CalendarEntry, participants: &[Person]) -> Result<(), AppError>;
    /// Returns whether an entry was removed. A missing id is not an error.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
    async fn assignments_for(&self, entry_id: &str) -> Result<Vec<Person>, AppError>;
    async fn list_for_person(&self, person: Person, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledEntry>, AppError>;
    async fn list_for_lead(&self, lead_id: &str) -> Result<Vec<ScheduledEntry>, AppError>;
}

/// Read access to the externally owned leads, plus the deletion hook the
/// owning subsystem must go through so entries are detached, not dangling.
#[async_trait]
pub trait LeadDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<LeadSummary>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<LeadSummary>, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}
