//! Stateless engine endpoints.
//!
//! These compute straight from the request body. Counts and thresholds are normalized
//! before reaching the engine: negative counts become 0, `presentDays` is capped at
//! `totalDays`, and the threshold is clamped into `[0, 100]`.

use crate::{
    api::AppState,
    core::{
        engine::{Classification, Requirement, classify, compute_requirement},
        policy::{clamp_threshold, validate_threshold},
    },
    errors::Result,
};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Create a router for the engine APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attendance/classify", post(classify_counts))
        .route("/attendance/requirement", post(requirement_for_counts))
        .route("/settings/threshold", post(normalize_threshold))
}

/// Body of the classify and requirement endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsRequest {
    /// Classes attended
    pub present_days: i64,
    /// Classes attended plus missed
    pub total_days: i64,
    /// Threshold percentage
    pub min_percentage: i64,
}

impl CountsRequest {
    fn normalized(self) -> (u32, u32, u32) {
        let total = u32::try_from(self.total_days.max(0)).unwrap_or(u32::MAX);
        let present = u32::try_from(self.present_days.max(0))
            .unwrap_or(u32::MAX)
            .min(total);
        (present, total, u32::from(clamp_threshold(self.min_percentage)))
    }
}

/// Body of the threshold endpoint, in and out
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ThresholdBody<T> {
    /// Threshold value
    pub value: T,
}

async fn classify_counts(Json(request): Json<CountsRequest>) -> Json<Classification> {
    let (present, total, threshold) = request.normalized();
    debug!(present, total, threshold, "POST /attendance/classify");
    Json(classify(present, total, threshold))
}

async fn requirement_for_counts(Json(request): Json<CountsRequest>) -> Json<Requirement> {
    let (present, total, threshold) = request.normalized();
    debug!(present, total, threshold, "POST /attendance/requirement");
    Json(compute_requirement(present, total, threshold))
}

async fn normalize_threshold(
    Json(request): Json<ThresholdBody<f64>>,
) -> Result<Json<ThresholdBody<u8>>> {
    let value = validate_threshold(request.value)?;
    Ok(Json(ThresholdBody { value }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_classify_endpoint() {
        let (app, _) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/attendance/classify",
            Some(json!({ "presentDays": 75, "totalDays": 100, "minPercentage": 75 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "percentage": 75, "status": "safe" }));

        let (_, body) = send(
            &app,
            Method::POST,
            "/attendance/classify",
            Some(json!({ "presentDays": 0, "totalDays": 0, "minPercentage": 75 })),
        )
        .await;
        assert_eq!(body, json!({ "percentage": 0, "status": "unknown" }));
    }

    #[tokio::test]
    async fn test_requirement_endpoint() {
        let (app, _) = test_app().await;

        let (_, body) = send(
            &app,
            Method::POST,
            "/attendance/requirement",
            Some(json!({ "presentDays": 85, "totalDays": 100, "minPercentage": 75 })),
        )
        .await;
        assert_eq!(body, json!({ "type": "canMiss", "count": 13 }));

        let (_, body) = send(
            &app,
            Method::POST,
            "/attendance/requirement",
            Some(json!({ "presentDays": 60, "totalDays": 100, "minPercentage": 75 })),
        )
        .await;
        assert_eq!(body, json!({ "type": "needAttend", "count": 60 }));

        // Unbounded requirement serializes a null count
        let (_, body) = send(
            &app,
            Method::POST,
            "/attendance/requirement",
            Some(json!({ "presentDays": 9, "totalDays": 10, "minPercentage": 100 })),
        )
        .await;
        assert_eq!(body, json!({ "type": "needAttend", "count": null }));
    }

    #[tokio::test]
    async fn test_requirement_endpoint_normalizes_input() {
        let (app, _) = test_app().await;

        // Threshold 150 clamps to 100 and present is capped at total
        let (_, body) = send(
            &app,
            Method::POST,
            "/attendance/requirement",
            Some(json!({ "presentDays": 20, "totalDays": 10, "minPercentage": 150 })),
        )
        .await;
        assert_eq!(body, json!({ "type": "canMiss", "count": 0 }));
    }

    #[tokio::test]
    async fn test_threshold_endpoint_clamps() {
        let (app, _) = test_app().await;

        for (input, expected) in [(150.0, 100), (-10.0, 0), (72.6, 73)] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/settings/threshold",
                Some(json!({ "value": input })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "value": expected }));
        }
    }

    #[tokio::test]
    async fn test_malformed_body_rejected() {
        let (app, _) = test_app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/settings/threshold",
            Some(json!({ "value": "high" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
