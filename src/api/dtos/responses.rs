use serde::Serialize;
use chrono::NaiveDate;

#[derive(Serialize)]
pub struct EntryCreatedResponse {
    pub id: String,
}

/// Prefill for the "new entry" form.
#[derive(Serialize)]
pub struct FormDefaultsResponse {
    pub date: NaiveDate,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub lead_id: Option<String>,
    pub participants: Vec<String>,
}

impl FormDefaultsResponse {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            title: String::new(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            lead_id: None,
            participants: Vec::new(),
        }
    }
}
