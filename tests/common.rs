use calendar_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{sqlite_entry_repo::SqliteEntryRepo, sqlite_lead_repo::SqliteLeadRepo},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::Value;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            timezone: chrono_tz::UTC,
            log_dir: "./logs".to_string(),
        };

        let state = Arc::new(AppState::new(
            config,
            Arc::new(SqliteEntryRepo::new(pool.clone())),
            Arc::new(SqliteLeadRepo::new(pool.clone())),
        ));

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap();
        parse_response(response).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, payload: Value) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder().method(method).uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap();
        parse_response(response).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(
            Request::builder().method("DELETE").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap();
        parse_response(response).await
    }

    /// Creates an entry through the API and returns its id.
    pub async fn create_entry(&self, title: &str, date: &str, start: &str, end: &str, people: &[&str]) -> String {
        let (status, body) = self.send_json("POST", "/api/v1/entries", serde_json::json!({
            "title": title, "date": date, "start_time": start, "end_time": end,
            "participants": people,
        })).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["id"].as_str().expect("No id in create response").to_string()
    }

    /// Leads belong to another subsystem, so tests seed them directly.
    pub async fn insert_lead(&self, id: &str, company: &str) {
        sqlx::query("INSERT INTO leads (id, company) VALUES (?, ?)")
            .bind(id)
            .bind(company)
            .execute(&self.pool)
            .await
            .expect("Failed to insert lead");
    }

    pub async fn count_entries(&self, entry_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM calendar_entries WHERE id = ?")
            .bind(entry_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    pub async fn participant_rows(&self, entry_id: &str) -> Vec<String> {
        sqlx::query_scalar("SELECT person_id FROM calendar_entry_participants WHERE entry_id = ? ORDER BY person_id")
            .bind(entry_id)
            .fetch_all(&self.pool)
            .await
            .unwrap()
    }

    pub async fn total_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

async fn parse_response(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
