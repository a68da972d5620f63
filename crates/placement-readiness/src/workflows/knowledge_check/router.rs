use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::KnowledgeCheck;

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeSubmission {
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

pub fn knowledge_check_router(check: Arc<KnowledgeCheck>) -> Router {
    Router::new()
        .route("/api/v1/knowledge-check", get(questions_handler))
        .route("/api/v1/knowledge-check/submissions", post(submit_handler))
        .with_state(check)
}

pub(crate) async fn questions_handler(State(check): State<Arc<KnowledgeCheck>>) -> Response {
    let payload = json!({ "questions": check.questions() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler(
    State(check): State<Arc<KnowledgeCheck>>,
    axum::Json(submission): axum::Json<KnowledgeSubmission>,
) -> Response {
    match check.score(&submission.answers) {
        Ok(score) => (StatusCode::OK, axum::Json(score)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
