use crate::cli::ServeArgs;
use crate::infra::{load_reference, AppState};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use eih_scorer::config::AppConfig;
use eih_scorer::error::AppError;
use eih_scorer::scoring::ScoringState;
use eih_scorer::telemetry;
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

    let reference = Arc::new(load_reference(&config.data)?);
    let scoring = ScoringState::new(reference, config.scoring);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_site_routes(scoring)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        shelter_radius_km = config.scoring.shelter_radius_km,
        "site scorer ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
