//! Maps crate errors onto HTTP responses.
//!
//! Bodies are JSON: `{"error": "<summary>", "messages": ["..."]}`. Validation failures
//! list one message per violated rule.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

impl Error {
    /// HTTP status this error is reported with
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::SubjectNotFound { .. } => StatusCode::NOT_FOUND,
            Self::SubjectAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::Config { .. }
            | Self::Database(_)
            | Self::CorruptValue { .. }
            | Self::Fmt(_)
            | Self::Io(_)
            | Self::Framework(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected: {self}");
        }

        let body = json!({
            "error": self.to_string(),
            "messages": self.messages(),
        });
        (status, Json(body)).into_response()
    }
}
