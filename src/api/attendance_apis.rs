//! # REST API for Attendance Records and Statistics
//!
//! Endpoints for the day sheet, marking and clearing a day, and the full report.

use crate::{
    api::AppState,
    core::{
        attendance::{self, AttendanceStatus, DaySheetEntry},
        report::{AttendanceReport, generate_user_report},
    },
    entities::AttendanceModel,
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

/// Create a router for attendance related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/attendance",
            get(get_day_sheet).put(mark_attendance),
        )
        .route(
            "/users/:user_id/attendance/:subject_id/:date",
            delete(clear_attendance),
        )
        .route("/users/:user_id/stats", get(get_stats))
}

/// Query of `GET /users/:user_id/attendance`
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    /// Day to list, `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Body of `PUT /users/:user_id/attendance`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    /// Subject to mark
    pub subject_id: i64,
    /// Day to mark, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// New status; `unmarked` removes the record
    pub status: AttendanceStatus,
}

async fn get_day_sheet(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<DaySheetEntry>>> {
    Ok(Json(
        attendance::get_day_sheet(&state.db, &user_id, query.date).await?,
    ))
}

async fn mark_attendance(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<MarkAttendanceRequest>,
) -> Result<Json<Option<AttendanceModel>>> {
    info!(
        "PUT /users/{user_id}/attendance - subject: {}, date: {}, status: {}",
        request.subject_id, request.date, request.status
    );

    let record = attendance::mark_attendance(
        &state.db,
        &user_id,
        request.subject_id,
        request.date,
        request.status,
    )
    .await?;
    Ok(Json(record))
}

async fn clear_attendance(
    State(state): State<AppState>,
    Path((user_id, subject_id, date)): Path<(String, i64, NaiveDate)>,
) -> Result<StatusCode> {
    info!("DELETE /users/{user_id}/attendance/{subject_id}/{date}");

    let removed = attendance::clear_attendance(&state.db, &user_id, subject_id, date).await?;
    Ok(if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    })
}

async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AttendanceReport>> {
    Ok(Json(
        generate_user_report(&state.db, &user_id, state.default_min_percentage).await?,
    ))
}
