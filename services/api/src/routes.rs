use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use placement_readiness::workflows::knowledge_check::{knowledge_check_router, KnowledgeCheck};
use placement_readiness::workflows::readiness::{readiness_router, ReadinessPipeline};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_readiness_routes(
    pipeline: Arc<ReadinessPipeline>,
    knowledge_check: Arc<KnowledgeCheck>,
) -> axum::Router {
    readiness_router(pipeline)
        .merge(knowledge_check_router(knowledge_check))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::load_pipeline;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../artifacts"));
        let pipeline = load_pipeline(dir).expect("artifacts load");
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let router = with_readiness_routes(pipeline, Arc::new(KnowledgeCheck::standard()))
            .layer(Extension(state));
        (router, readiness)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn health_is_always_ok() {
        let (app, _) = app(false);

        let response = app.oneshot(get("/health")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn ready_tracks_listener_flag() {
        let (app, readiness) = app(false);

        let response = app.clone().oneshot(get("/ready")).await.expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, Ordering::Release);
        let response = app.oneshot(get("/ready")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_render_as_prometheus_text() {
        let (app, _) = app(true);

        let response = app.oneshot(get("/metrics")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn merged_router_serves_assessments_and_quiz() {
        let (app, _) = app(true);
        let profile = json!({
            "dsa_level": "Advanced",
            "problem_count": 420,
            "language_count": 4,
            "cs_fundamentals": 5,
            "project_count": 6,
            "major_project": "Yes",
            "github_quality": "High",
            "domain_focus": "ML",
            "communication": 4,
            "resume_quality": 5,
            "mock_interviews": 8,
            "learning_consistency": 5,
            "self_awareness": 4
        });

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/readiness/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(profile.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"]["level"], "Advanced");
        assert_eq!(body["result"]["confidence"], 80);
        assert_eq!(
            body["recommendations"][0],
            "AI Interview Bot / Recommendation System"
        );

        let response = app
            .oneshot(get("/api/v1/knowledge-check"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
