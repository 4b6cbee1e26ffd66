use axum::{
    body::Body,
    extract::Request,
    routing::{get, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, roster, lead, entry, calendar};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Roster & Leads (read-only collaborators)
        .route("/api/v1/roster", get(roster::list_roster_members))
        .route("/api/v1/leads", get(lead::list_leads))
        .route("/api/v1/leads/{lead_id}", delete(lead::delete_lead))
        .route("/api/v1/leads/{lead_id}/entries", get(lead::list_lead_entries))

        // Entries
        .route("/api/v1/entries", get(entry::list_entries).post(entry::create_entry))
        .route("/api/v1/entries/{entry_id}", get(entry::get_entry).put(entry::update_entry).delete(entry::delete_entry))
        .route("/api/v1/entries/{entry_id}/participants", get(entry::list_participants))
        .route("/api/v1/people/{person_id}/entries", get(entry::list_person_entries))

        // Week view
        .route("/api/v1/calendar/week", get(calendar::get_week))
        .route("/api/v1/calendar/defaults", get(calendar::get_form_defaults))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
