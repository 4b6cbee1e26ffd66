use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use std::sync::Arc;

pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    Json(state.scheduling.list_leads().await)
}

pub async fn list_lead_entries(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.scheduling.entries_for_lead(&lead_id).await?;
    Ok(Json(entries))
}

pub async fn delete_lead(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.scheduling.delete_lead(&lead_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
