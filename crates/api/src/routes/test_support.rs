//! Helpers for router tests against a mock warehouse.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, Value};
use serde_json::Value as Json;
use tower::ServiceExt;

use crate::AppState;
use crate::insight::{InsightError, InsightGenerator};

/// Mock row type accepted by `MockDatabase::append_query_results`.
pub type Row = BTreeMap<&'static str, Value>;

/// Generator returning a canned reply, or an upstream failure when `None`.
pub struct StubInsight(pub Option<&'static str>);

#[async_trait]
impl InsightGenerator for StubInsight {
    async fn generate(&self, _system: &str, prompt: &str) -> Result<String, InsightError> {
        assert!(!prompt.is_empty());
        self.0.map(str::to_string).ok_or(InsightError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        })
    }
}

/// State over a mock connection serving `results` in order.
pub fn state_with_rows(results: Vec<Vec<Row>>) -> AppState {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(results)
        .into_connection();
    state(db, None)
}

/// State whose every warehouse statement fails. Covers a two-season summary.
pub fn failing_state() -> AppState {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors((0..16).map(|_| DbErr::Custom("warehouse unavailable".into())))
        .into_connection();
    state(db, None)
}

/// State over `db` with an optional insight generator.
pub fn state(db: DatabaseConnection, insight: Option<Arc<dyn InsightGenerator>>) -> AppState {
    AppState {
        db: Arc::new(db),
        insight,
    }
}

/// Empty mock connection.
pub fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Json) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Json::Null);
    (status, json)
}

/// Sends a GET and decodes the JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Sends a JSON POST and decodes the JSON body.
pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Json) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
