use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use appraisal_ai::config::AppConfig;
use appraisal_ai::error::AppError;
use appraisal_ai::telemetry;
use appraisal_ai::workflows::appraisal::{AppraisalService, RiskConfig};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, GazetteerTagger, ManifestDetector};
use crate::routes::with_assessment_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(rules) = args.rules.take() {
        config.rules.path = rules;
    }

    telemetry::init(&config.telemetry)?;

    // Missing or malformed rules are fatal; the engine cannot run without them.
    let rules = RiskConfig::from_path(&config.rules.path)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let tagger = Arc::new(GazetteerTagger::default());
    let detector = Arc::new(match args.detections.take() {
        Some(path) => ManifestDetector::from_path(&path)?,
        None => ManifestDetector::default(),
    });
    let service = Arc::new(AppraisalService::new(tagger, detector, rules));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "appraisal risk assessor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
