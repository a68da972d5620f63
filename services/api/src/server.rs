use crate::cli::ServeArgs;
use crate::infra::{load_pipeline, AppState};
use crate::routes::with_readiness_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_readiness::config::AppConfig;
use placement_readiness::error::AppError;
use placement_readiness::telemetry;
use placement_readiness::workflows::knowledge_check::KnowledgeCheck;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let pipeline = load_pipeline(&config.model.artifact_dir)?;
    let knowledge_check = Arc::new(KnowledgeCheck::standard());

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_readiness_routes(pipeline, knowledge_check)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement readiness service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
