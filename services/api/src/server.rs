use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionRepository, StaticGuidelineStore};
use crate::routes::with_underwriting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fedorato::config::AppConfig;
use fedorato::error::AppError;
use fedorato::telemetry;
use fedorato::workflows::underwriting::TriageService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let thresholds = config.guidelines.resolve()?;
    info!(
        max_tiv = thresholds.max_tiv,
        min_winnability = thresholds.min_winnability,
        source = config
            .guidelines
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "underwriting guidelines loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let triage_service = Arc::new(TriageService::new(
        Arc::new(InMemorySubmissionRepository::default()),
        Arc::new(StaticGuidelineStore::new(thresholds)),
    ));

    let app = with_underwriting_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "submission triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
