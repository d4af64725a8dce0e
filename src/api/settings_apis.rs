//! # REST API for User Settings

use crate::{
    api::AppState,
    core::settings::{self, Settings, SettingsUpdate},
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::info;

/// Create a router for settings related APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/settings",
        get(get_settings).put(update_settings),
    )
}

async fn get_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Settings>> {
    Ok(Json(
        settings::get_settings(&state.db, &user_id, state.default_min_percentage).await?,
    ))
}

async fn update_settings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<Settings>> {
    info!("PUT /users/{user_id}/settings - update: {update:?}");
    Ok(Json(
        settings::update_settings(&state.db, &user_id, &update, state.default_min_percentage)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_settings_defaults_and_update() {
        let (app, _) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/users/alice/settings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "minPercentage": 75, "theme": "system" }));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users/alice/settings",
            Some(json!({ "minPercentage": 140, "theme": "dark" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "minPercentage": 100, "theme": "dark" }));

        let (_, body) = send(
            &app,
            Method::PUT,
            "/users/alice/settings",
            Some(json!({ "minPercentage": 80 })),
        )
        .await;
        assert_eq!(body, json!({ "minPercentage": 80, "theme": "dark" }));
    }

    #[tokio::test]
    async fn test_threshold_drives_stats() {
        let (app, _) = test_app().await;
        send(
            &app,
            Method::PUT,
            "/users/alice/settings",
            Some(json!({ "minPercentage": 60 })),
        )
        .await;

        let (_, report) = send(&app, Method::GET, "/users/alice/stats", None).await;
        assert_eq!(report["minPercentage"], 60);
    }
}
