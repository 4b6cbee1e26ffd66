use axum::{response::IntoResponse, Json};
use crate::domain::models::person::list_roster;

pub async fn list_roster_members() -> impl IntoResponse {
    Json(list_roster())
}
