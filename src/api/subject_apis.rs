//! # REST API for Subject Management
//!
//! Endpoints for listing, creating, updating and deleting a user's subjects.

use crate::{
    api::AppState,
    core::{
        subject::{self, SubjectUpdate},
        validation::SubjectInput,
    },
    entities::SubjectModel,
    errors::Result,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde::Deserialize;
use tracing::info;

/// Create a router for subject related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/subjects",
            get(list_subjects).post(create_subject),
        )
        .route(
            "/users/:user_id/subjects/:id",
            put(update_subject).delete(delete_subject),
        )
}

/// Body of `POST /users/:user_id/subjects`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    /// Subject name
    pub name: String,
    /// Optional professor name
    pub professor_name: Option<String>,
    /// Optional palette color
    pub color: Option<String>,
}

/// Body of `PUT /users/:user_id/subjects/:id`; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectRequest {
    /// New name
    pub name: Option<String>,
    /// New professor name, empty string to clear
    pub professor_name: Option<String>,
    /// New palette color
    pub color: Option<String>,
}

async fn list_subjects(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<SubjectModel>>> {
    Ok(Json(subject::get_subjects_for_user(&state.db, &user_id).await?))
}

async fn create_subject(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectModel>)> {
    info!("POST /users/{user_id}/subjects - name: {}", request.name);

    let input = SubjectInput {
        name: request.name,
        professor_name: request.professor_name,
        color: request.color,
    };
    let created = subject::create_subject(&state.db, &user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_subject(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, i64)>,
    Json(request): Json<UpdateSubjectRequest>,
) -> Result<Json<SubjectModel>> {
    info!("PUT /users/{user_id}/subjects/{id}");

    let update = SubjectUpdate {
        name: request.name,
        professor_name: request.professor_name,
        color: request.color,
    };
    Ok(Json(
        subject::update_subject(&state.db, &user_id, id, &update).await?,
    ))
}

async fn delete_subject(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, i64)>,
) -> Result<StatusCode> {
    info!("DELETE /users/{user_id}/subjects/{id}");
    subject::delete_subject(&state.db, &user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
