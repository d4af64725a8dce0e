//! # REST API for the Weekly Schedule
//!
//! `GET` returns all seven days; `PUT` replaces one day's ordered subject list.

use crate::{
    api::AppState,
    core::{
        schedule::{DaySchedule, get_week_schedule, set_day_schedule},
        validation::{validate_schedule_request, weekday_name},
    },
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Create a router for schedule related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/schedule", get(get_schedule))
        .route("/users/:user_id/schedule/:day", put(put_day_schedule))
}

/// Body of `PUT /users/:user_id/schedule/:day`
#[derive(Debug, Clone, Deserialize)]
pub struct DayScheduleRequest {
    /// Subject names in class order; kept untyped so shape errors report as validation
    pub subjects: Value,
}

async fn get_schedule(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<DaySchedule>>> {
    Ok(Json(get_week_schedule(&state.db, &user_id).await?))
}

async fn put_day_schedule(
    State(state): State<AppState>,
    Path((user_id, day)): Path<(String, String)>,
    Json(request): Json<DayScheduleRequest>,
) -> Result<Json<DaySchedule>> {
    info!("PUT /users/{user_id}/schedule/{day}");

    let (weekday, names) = validate_schedule_request(&day, &request.subjects)?;
    let subjects = set_day_schedule(&state.db, &user_id, i64::from(weekday), &names).await?;

    Ok(Json(DaySchedule {
        weekday,
        day_name: weekday_name(weekday).unwrap_or_default(),
        subjects,
    }))
}
