use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::classifier::ReadinessLevel;
use super::profile::StudentProfile;
use super::recommendations;
use super::service::ReadinessPipeline;

/// Body of the standalone recommendation lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub level: String,
    pub domain: String,
}

/// Router builder exposing assessment and recommendation endpoints.
pub fn readiness_router(pipeline: Arc<ReadinessPipeline>) -> Router {
    Router::new()
        .route("/api/v1/readiness/assessments", post(assess_handler))
        .route(
            "/api/v1/readiness/recommendations",
            post(recommendations_handler),
        )
        .with_state(pipeline)
}

pub(crate) async fn assess_handler(
    State(pipeline): State<Arc<ReadinessPipeline>>,
    payload: Result<axum::Json<StudentProfile>, JsonRejection>,
) -> Response {
    let profile = match payload {
        Ok(axum::Json(profile)) => profile,
        Err(rejection) => {
            let payload = json!({
                "error": rejection.body_text(),
                "field": null,
            });
            return (rejection.status(), axum::Json(payload)).into_response();
        }
    };

    match pipeline.assess(&profile) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(err) if err.is_caller_error() => {
            let payload = json!({
                "error": err.to_string(),
                "field": err.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err) => {
            error!(error = %err, "assessment failed after validation");
            let payload = json!({
                "error": err.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recommendations_handler(
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response {
    let Some(level) = ReadinessLevel::from_label(&request.level) else {
        let payload = json!({
            "error": format!("unknown readiness level '{}'", request.level),
            "field": "level",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    match recommendations::resolve(level, &request.domain) {
        Ok(set) => {
            let payload = json!({
                "level": level,
                "recommendations": set,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({
                "error": err.to_string(),
                "field": "domain",
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
