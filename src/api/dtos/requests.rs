use crate::domain::models::entry::{hhmm, EntryFields};
use crate::error::AppError;
use chrono::{NaiveDate, NaiveTime};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::invalid(field, format!("Invalid date '{}' (expected YYYY-MM-DD)", value)))
}

pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, AppError> {
    hhmm::parse(value)
        .ok_or_else(|| AppError::invalid(field, format!("Invalid time '{}' (expected HH:MM)", value)))
}

/// Takes one field out of a JSON body. Missing and `null` both read as absent;
/// a value of the wrong type is a validation error on that field.
fn take_field<T: DeserializeOwned>(body: &mut Map<String, Value>, field: &'static str) -> Result<Option<T>, AppError> {
    match body.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::invalid(field, format!("Invalid value for {}: {}", field, e))),
    }
}

/// Body of both the create and the edit form.
pub struct EntryRequest {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub participants: Vec<String>,
    pub lead_id: Option<String>,
}

impl EntryRequest {
    /// Reads the form body field by field so a type mismatch names its field.
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        let Value::Object(mut body) = body else {
            return Err(AppError::invalid("body", "Expected a JSON object"));
        };

        Ok(Self {
            title: take_field(&mut body, "title")?.unwrap_or_default(),
            date: take_field(&mut body, "date")?.unwrap_or_default(),
            start_time: take_field(&mut body, "start_time")?.unwrap_or_default(),
            end_time: take_field(&mut body, "end_time")?.unwrap_or_default(),
            participants: take_field(&mut body, "participants")?.unwrap_or_default(),
            lead_id: take_field(&mut body, "lead_id")?,
        })
    }

    pub fn into_fields(self) -> Result<(EntryFields, Vec<String>), AppError> {
        let fields = EntryFields {
            date: parse_date("date", &self.date)?,
            start_time: parse_time("start_time", &self.start_time)?,
            end_time: parse_time("end_time", &self.end_time)?,
            title: self.title,
            // The form sends "" for "no lead"
            lead_id: self.lead_id.filter(|id| !id.trim().is_empty()),
        };
        Ok((fields, self.participants))
    }
}

#[derive(Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
}

impl RangeQuery {
    pub fn parse(&self) -> Result<(NaiveDate, NaiveDate), AppError> {
        Ok((parse_date("from", &self.from)?, parse_date("to", &self.to)?))
    }
}

#[derive(Deserialize)]
pub struct WeekQuery {
    pub date: Option<String>,
    pub offset: Option<i64>,
}

#[derive(Deserialize)]
pub struct DefaultsQuery {
    pub date: Option<String>,
}
