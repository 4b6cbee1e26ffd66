use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_date, DefaultsQuery, WeekQuery};
use crate::api::dtos::responses::FormDefaultsResponse;
use crate::error::AppError;
use std::sync::Arc;
use chrono::{NaiveDate, Utc};

fn today(state: &AppState) -> NaiveDate {
    Utc::now().with_timezone(&state.config.timezone).date_naive()
}

pub async fn get_week(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = today(&state);
    let reference = match query.date.as_deref() {
        Some(raw) => parse_date("date", raw)?,
        None => today,
    };

    let schedule = state.scheduling
        .week_schedule(reference, query.offset.unwrap_or(0), today)
        .await?;
    Ok(Json(schedule))
}

pub async fn get_form_defaults(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DefaultsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date("date", raw)?,
        None => today(&state),
    };
    Ok(Json(FormDefaultsResponse::for_date(date)))
}
