mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::json;
use tower::ServiceExt;

const RICHARD: &str = "richard-gumpinger";
const SIMON: &str = "simon-hoeld";
const BENNET: &str = "bennet-wylezol";

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let app = TestApp::new().await;
    let id = app.create_entry("Kickoff", "2024-06-03", "09:00", "10:00", &[RICHARD]).await;

    let (status, body) = app.get("/api/v1/entries?from=2024-06-03&to=2024-06-03").await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["title"], "Kickoff");
    assert_eq!(list[0]["date"], "2024-06-03");
    assert_eq!(list[0]["start_time"], "09:00");
    assert_eq!(list[0]["end_time"], "10:00");
    assert!(list[0]["lead"].is_null());

    let participants = list[0]["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["id"], RICHARD);
    assert_eq!(participants[0]["display_name"], "Richard Gumpinger");
}

#[tokio::test]
async fn test_list_is_ordered_by_date_then_start() {
    let app = TestApp::new().await;
    app.create_entry("Tue late", "2024-06-04", "15:00", "16:00", &[SIMON]).await;
    app.create_entry("Mon late", "2024-06-03", "14:00", "15:00", &[SIMON]).await;
    app.create_entry("Mon early", "2024-06-03", "08:00", "09:00", &[BENNET]).await;
    app.create_entry("Next week", "2024-06-10", "08:00", "09:00", &[BENNET]).await;

    let (_, body) = app.get("/api/v1/entries?from=2024-06-03&to=2024-06-09").await;
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|e| e["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Mon early", "Mon late", "Tue late"]);
}

#[tokio::test]
async fn test_empty_range_returns_empty_list() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/entries?from=2030-01-07&to=2030-01-13").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_inverted_range_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/entries?from=2024-06-09&to=2024-06-03").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "to");
}

#[tokio::test]
async fn test_create_without_participants_persists_nothing() {
    let app = TestApp::new().await;

    let (status, body) = app.send_json("POST", "/api/v1/entries", json!({
        "title": "Lonely", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00",
        "participants": []
    })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "participants");
    assert_eq!(app.total_rows("calendar_entries").await, 0);
    assert_eq!(app.total_rows("calendar_entry_participants").await, 0);
}

#[tokio::test]
async fn test_create_validation_errors_name_the_field() {
    let app = TestApp::new().await;

    let cases = [
        (json!({"title": "", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00", "participants": [RICHARD]}), "title"),
        (json!({"title": "X", "date": "2024-06-03", "start_time": "10:00", "end_time": "10:00", "participants": [RICHARD]}), "end_time"),
        (json!({"title": "X", "date": "2024-06-03", "start_time": "11:00", "end_time": "10:00", "participants": [RICHARD]}), "end_time"),
        (json!({"title": "X", "date": "June 3rd", "start_time": "09:00", "end_time": "10:00", "participants": [RICHARD]}), "date"),
        (json!({"title": "X", "date": "2024-06-03", "start_time": "25:00", "end_time": "10:00", "participants": [RICHARD]}), "start_time"),
        (json!({"title": "X", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00", "participants": [RICHARD, "Max Mustermann"]}), "participants"),
        (json!({"title": "X", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00"}), "participants"),
    ];

    for (payload, field) in cases {
        let (status, body) = app.send_json("POST", "/api/v1/entries", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["field"], field, "payload {}", payload);
    }

    assert_eq!(app.total_rows("calendar_entries").await, 0);
}

#[tokio::test]
async fn test_times_with_seconds_are_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.send_json("POST", "/api/v1/entries", json!({
        "title": "Blip", "date": "2024-06-03", "start_time": "09:00:00", "end_time": "09:00:30",
        "participants": [RICHARD]
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "end_time");
    assert_eq!(app.total_rows("calendar_entries").await, 0);

    // Whole minutes in HH:MM:SS form read back unchanged
    let id = app.create_entry("Whole", "2024-06-03", "09:00:00", "09:30:00", &[RICHARD]).await;
    let (_, entry) = app.get(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(entry["start_time"], "09:00");
    assert_eq!(entry["end_time"], "09:30");

    let (status, _) = app.send_json("PUT", &format!("/api/v1/entries/{}", id), json!({
        "title": entry["title"], "date": entry["date"], "start_time": entry["start_time"],
        "end_time": entry["end_time"], "participants": [RICHARD]
    })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_mistyped_body_fields_name_the_field() {
    let app = TestApp::new().await;

    let (status, body) = app.send_json("POST", "/api/v1/entries", json!({
        "title": "X", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00",
        "participants": SIMON
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "participants");

    let (status, body) = app.send_json("POST", "/api/v1/entries", json!({
        "title": null, "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00",
        "participants": [SIMON]
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "title");

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/entries")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json")).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.total_rows("calendar_entries").await, 0);
}

#[tokio::test]
async fn test_display_names_are_accepted_as_participants() {
    let app = TestApp::new().await;
    let id = app.create_entry("Legacy form", "2024-06-03", "09:00", "10:00", &["Simon Höld", SIMON]).await;

    assert_eq!(app.participant_rows(&id).await, vec![SIMON.to_string()]);
}

#[tokio::test]
async fn test_update_replaces_participant_set() {
    let app = TestApp::new().await;
    let id = app.create_entry("Planning", "2024-06-03", "09:00", "10:00", &[RICHARD, SIMON]).await;
    assert_eq!(app.participant_rows(&id).await.len(), 2);

    let (status, _) = app.send_json("PUT", &format!("/api/v1/entries/{}", id), json!({
        "title": "Planning (moved)", "date": "2024-06-04", "start_time": "13:00", "end_time": "14:30",
        "participants": [BENNET], "lead_id": ""
    })).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.participant_rows(&id).await, vec![BENNET.to_string()]);

    let (status, entry) = app.get(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["title"], "Planning (moved)");
    assert_eq!(entry["date"], "2024-06-04");
    assert_eq!(entry["start_time"], "13:00");
    assert_eq!(entry["end_time"], "14:30");
    assert_eq!(entry["participants"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_update_leaves_entry_untouched() {
    let app = TestApp::new().await;
    let id = app.create_entry("Stable", "2024-06-03", "09:00", "10:00", &[RICHARD, SIMON]).await;

    let (status, _) = app.send_json("PUT", &format!("/api/v1/entries/{}", id), json!({
        "title": "Broken", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00",
        "participants": []
    })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, entry) = app.get(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(entry["title"], "Stable");
    assert_eq!(app.participant_rows(&id).await.len(), 2);
}

#[tokio::test]
async fn test_update_unknown_entry_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.send_json("PUT", "/api/v1/entries/does-not-exist", json!({
        "title": "Ghost", "date": "2024-06-03", "start_time": "09:00", "end_time": "10:00",
        "participants": [RICHARD]
    })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.total_rows("calendar_entry_participants").await, 0);
}

#[tokio::test]
async fn test_delete_removes_entry_and_assignments_idempotently() {
    let app = TestApp::new().await;
    let keep = app.create_entry("Keep", "2024-06-03", "09:00", "10:00", &[RICHARD]).await;
    let id = app.create_entry("Drop", "2024-06-03", "11:00", "12:00", &[RICHARD, SIMON, BENNET]).await;

    let (status, body) = app.delete(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "deleted");

    assert_eq!(app.count_entries(&id).await, 0);
    assert!(app.participant_rows(&id).await.is_empty());

    // Second delete is a no-op
    let (status, _) = app.delete(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.count_entries(&keep).await, 1);
    assert_eq!(app.participant_rows(&keep).await.len(), 1);

    let (status, _) = app.get(&format!("/api/v1/entries/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_participants_of_entry() {
    let app = TestApp::new().await;
    let id = app.create_entry("Trio", "2024-06-03", "09:00", "10:00", &[BENNET, RICHARD]).await;

    let (status, body) = app.get(&format!("/api/v1/entries/{}/participants", id)).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![RICHARD, BENNET]);

    let (status, _) = app.get("/api/v1/entries/missing/participants").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_entries_of_person() {
    let app = TestApp::new().await;
    app.create_entry("Shared", "2024-06-03", "09:00", "10:00", &[RICHARD, SIMON]).await;
    app.create_entry("Simon only", "2024-06-05", "09:00", "10:00", &[SIMON]).await;
    app.create_entry("Richard later", "2024-06-20", "09:00", "10:00", &[RICHARD]).await;

    let (status, body) = app.get(&format!("/api/v1/people/{}/entries?from=2024-06-03&to=2024-06-09", RICHARD)).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Shared");
    // The full participant set is still reported
    assert_eq!(list[0]["participants"].as_array().unwrap().len(), 2);

    let (_, body) = app.get(&format!("/api/v1/people/{}/entries?from=2024-06-03&to=2024-06-09", SIMON)).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = app.get("/api/v1/people/nobody/entries?from=2024-06-03&to=2024-06-09").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_roster_is_fixed() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/roster").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([
        {"id": RICHARD, "display_name": "Richard Gumpinger"},
        {"id": SIMON, "display_name": "Simon Höld"},
        {"id": BENNET, "display_name": "Bennet Wylezol"},
    ]));

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
