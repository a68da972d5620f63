use metrics_exporter_prometheus::PrometheusHandle;
use placement_readiness::error::AppError;
use placement_readiness::workflows::readiness::{ProfileBounds, ReadinessPipeline};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the inference artifacts once; a failure here stops the process.
pub(crate) fn load_pipeline(dir: &Path) -> Result<Arc<ReadinessPipeline>, AppError> {
    match ReadinessPipeline::from_artifacts(dir, ProfileBounds::default()) {
        Ok(pipeline) => Ok(Arc::new(pipeline)),
        Err(err) => {
            error!(dir = %dir.display(), error = %err, "model artifacts unavailable");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_directory_is_fatal() {
        let err = load_pipeline(Path::new("does/not/exist")).expect_err("no artifacts");
        assert!(matches!(err, AppError::Model(_)));
    }

    #[test]
    fn shipped_artifacts_load() {
        let dir = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../artifacts"));
        let pipeline = load_pipeline(dir).expect("artifacts load");
        assert_eq!(pipeline.bounds(), &ProfileBounds::default());
    }
}
