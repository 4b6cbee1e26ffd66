use axum::{extract::{rejection::JsonRejection, State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{EntryRequest, RangeQuery};
use crate::api::dtos::responses::EntryCreatedResponse;
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (from, to) = range.parse()?;
    let entries = state.scheduling.list_entries(from, to).await?;
    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.scheduling.get_entry(&entry_id).await?;
    Ok(Json(entry))
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let (fields, participants) = EntryRequest::from_json(body)?.into_fields()?;
    let id = state.scheduling.create_entry(fields, &participants).await?;
    Ok(Json(EntryCreatedResponse { id }))
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let (fields, participants) = EntryRequest::from_json(body)?.into_fields()?;
    state.scheduling.update_entry(&entry_id, fields, &participants).await?;
    Ok(Json(serde_json::json!({"status": "updated"})))
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.scheduling.delete_entry(&entry_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn list_participants(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let people = state.scheduling.assignments_for(&entry_id).await?;
    Ok(Json(people))
}

pub async fn list_person_entries(
    State(state): State<Arc<AppState>>,
    Path(person_id): Path<String>,
    Query(range): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (from, to) = range.parse()?;
    let entries = state.scheduling.entries_for(&person_id, from, to).await?;
    info!("Served {} entries of {} for {}..{}", entries.len(), person_id, from, to);
    Ok(Json(entries))
}
