use crate::cli::ServeArgs;
use crate::infra::{ApiState, AppState};
use crate::routes::with_api_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_risk::config::AppConfig;
use credit_risk::dashboard::DashboardData;
use credit_risk::error::AppError;
use credit_risk::scoring::RiskScorer;
use credit_risk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let data_path = &config.dashboard.data_path;
    let dataset = match DashboardData::from_path(data_path) {
        Ok(data) => {
            info!(
                path = %data_path.display(),
                applications = data.overview.total_applications,
                "dashboard dataset loaded"
            );
            Some(data)
        }
        Err(err) => {
            warn!(path = %data_path.display(), error = %err, "dashboard dataset unavailable");
            None
        }
    };

    let api_state = ApiState::new(RiskScorer::new())
        .with_dataset(dataset)
        .with_response_delay(config.scoring.response_delay());

    let app = with_api_routes(api_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit risk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
