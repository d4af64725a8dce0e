//! HTTP API - axum router over the core business logic.
//!
//! Two groups of routes share one [`AppState`]:
//! - stateless engine routes (`/attendance/classify`, `/attendance/requirement`,
//!   `/settings/threshold`) that compute from the request body alone
//! - user-scoped routes under `/users/:user_id` backed by the database

use axum::{Json, Router, routing::get};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod attendance_apis;
pub mod engine_apis;
pub mod error;
pub mod schedule_apis;
pub mod settings_apis;
pub mod subject_apis;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Threshold for users without stored settings
    pub default_min_percentage: u8,
}

impl AppState {
    /// Creates application state from a connection and the configured default threshold
    #[must_use]
    pub const fn new(db: DatabaseConnection, default_min_percentage: u8) -> Self {
        Self {
            db,
            default_min_percentage,
        }
    }
}

/// Builds the full application router with tracing and CORS layers applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(engine_apis::router())
        .merge(subject_apis::router())
        .merge(schedule_apis::router())
        .merge(attendance_apis::router())
        .merge(settings_apis::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]
    use super::{AppState, router};
    use crate::test_utils::setup_test_db;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    /// Router over a fresh in-memory database, default threshold 75
    pub async fn test_app() -> (Router, AppState) {
        let db = setup_test_db().await.unwrap();
        let state = AppState::new(db, 75);
        (router(state.clone()), state)
    }

    /// Sends one request and returns the status and the parsed JSON body (`Null` when empty).
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _) = test_app().await;
        let (status, _) = send(&app, Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
