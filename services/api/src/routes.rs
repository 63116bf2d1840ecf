use crate::infra::{ApiState, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use credit_risk::dashboard::{DashboardData, DashboardError};
use credit_risk::error::AppError;
use credit_risk::scoring::{ApplicantForm, ApplicantProfile, ConfidenceSource, RiskAssessment};
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssessmentResponse {
    #[serde(flatten)]
    pub(crate) assessment: RiskAssessment,
    pub(crate) profile: ApplicantProfile,
    pub(crate) assessed_at: DateTime<Utc>,
}

pub(crate) fn with_api_routes<C>(state: ApiState<C>) -> Router
where
    C: ConfidenceSource + 'static,
{
    Router::new()
        .route("/api/v1/dashboard", get(dashboard_endpoint::<C>))
        .route("/api/v1/risk/assessments", post(assessment_endpoint::<C>))
        .with_state(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn dashboard_endpoint<C>(
    State(state): State<ApiState<C>>,
) -> Result<Json<DashboardData>, AppError>
where
    C: ConfidenceSource + 'static,
{
    let dataset = state.dataset.as_ref().ok_or(DashboardError::NotLoaded)?;
    Ok(Json(DashboardData::clone(dataset)))
}

pub(crate) async fn assessment_endpoint<C>(
    State(state): State<ApiState<C>>,
    payload: Result<Json<ApplicantForm>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, AppError>
where
    C: ConfidenceSource + 'static,
{
    let Json(form) = payload?;

    if let Some(delay) = state.response_delay {
        tokio::time::sleep(delay).await;
    }

    let (profile, assessment) = state.scorer.assess_form(&form);
    info!(
        risk_score = assessment.risk_score,
        risk_level = assessment.risk_level.label(),
        "risk assessment served"
    );

    Ok(Json(AssessmentResponse {
        assessment,
        profile,
        assessed_at: Utc::now(),
    }))
}
