use credit_risk::dashboard::DashboardData;
use credit_risk::scoring::{ConfidenceSource, EducationLevel, RiskScorer};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared handles for the dashboard and scoring routes.
pub(crate) struct ApiState<C> {
    pub(crate) scorer: Arc<RiskScorer<C>>,
    pub(crate) dataset: Option<Arc<DashboardData>>,
    pub(crate) response_delay: Option<Duration>,
}

impl<C> Clone for ApiState<C> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
            dataset: self.dataset.clone(),
            response_delay: self.response_delay,
        }
    }
}

impl<C: ConfidenceSource> ApiState<C> {
    pub(crate) fn new(scorer: RiskScorer<C>) -> Self {
        Self {
            scorer: Arc::new(scorer),
            dataset: None,
            response_delay: None,
        }
    }

    pub(crate) fn with_dataset(mut self, dataset: Option<DashboardData>) -> Self {
        self.dataset = dataset.map(Arc::new);
        self
    }

    pub(crate) fn with_response_delay(mut self, delay: Option<Duration>) -> Self {
        self.response_delay = delay;
        self
    }
}

pub(crate) fn parse_education(raw: &str) -> Result<EducationLevel, String> {
    EducationLevel::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = EducationLevel::ordered()
            .iter()
            .map(EducationLevel::label)
            .collect();
        format!("unknown education '{raw}' (expected one of: {})", known.join(", "))
    })
}
