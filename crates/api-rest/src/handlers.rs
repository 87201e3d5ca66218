//! Request handlers.
//!
//! Every route is stateless apart from the shared read-only `AppState`. Malformed input never
//! escapes as a 500: the page routes render the error inline and the JSON routes answer
//! `400 {"error": ...}`.

use crate::page::render_page;
use crate::AppState;
use api_shared::{
    CommunityStatsRes, ErrorRes, HealthMetricsRes, HealthRes, HealthService, HealthTimelineRes,
    RiskFactorsRes,
};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{Html, Json},
    Form,
};
use cardio_core::metrics::{health_metrics as compute_health_metrics, HealthMetricsInput};
use cardio_core::risk::risk_factors as compute_risk_factors;
use cardio_core::{Assessment, Fields};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;

type ApiError = (StatusCode, Json<ErrorRes>);

fn bad_request(e: impl Display) -> ApiError {
    tracing::warn!("Rejected request: {}", e);
    (StatusCode::BAD_REQUEST, Json(ErrorRes::new(e.to_string())))
}

/// Render the empty assessment form.
pub(crate) async fn index() -> Html<String> {
    Html(render_page(None))
}

/// Start a fresh assessment.
pub(crate) async fn new_assessment() -> Html<String> {
    Html(render_page(None))
}

/// Run the submitted form through the classifier and render the outcome inline.
pub(crate) async fn assess(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    let assessment = match form {
        Ok(Form(fields)) => state.model.assess(Fields::Form(&fields)),
        Err(rejection) => {
            tracing::warn!("Unreadable assessment form: {}", rejection);
            Assessment::InputError(rejection.body_text())
        }
    };
    Html(render_page(Some(&assessment)))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
///
/// Always alive; reports whether the classifier artifact was loaded.
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.model.is_loaded()))
}

#[utoipa::path(
    post,
    path = "/api/health-metrics",
    responses(
        (status = 200, description = "Heart-rate zone, BMI, cholesterol and fitness", body = HealthMetricsRes),
        (status = 400, description = "Malformed input", body = ErrorRes)
    )
)]
/// Compute the four derived display metrics.
///
/// Reads `age`, `height_feet`, `height_inches`, `weight`, `highchol`, `physactivity` and an
/// optional `current_hr` from a JSON object; absent fields take their defaults.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not a JSON object or a value does not convert.
pub(crate) async fn health_metrics(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<HealthMetricsRes>, ApiError> {
    let Json(body) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    let input = HealthMetricsInput::from_json(&body).map_err(bad_request)?;
    let metrics = compute_health_metrics(&input).map_err(bad_request)?;
    Ok(Json(metrics))
}

#[utoipa::path(
    post,
    path = "/api/risk-factors",
    responses(
        (status = 200, description = "Eight bucketed risk factors", body = RiskFactorsRes),
        (status = 400, description = "Malformed input", body = ErrorRes)
    )
)]
/// Bucket the tracked risk factors as low, medium or high.
///
/// # Errors
/// Returns `400 Bad Request` if the body is not a JSON object or a value does not convert.
pub(crate) async fn risk_factors(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RiskFactorsRes>, ApiError> {
    let Json(body) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;
    let fields = Fields::from_json(&body).map_err(bad_request)?;
    let risk_factors = compute_risk_factors(fields).map_err(bad_request)?;
    Ok(Json(RiskFactorsRes { risk_factors }))
}

#[utoipa::path(
    get,
    path = "/api/community-stats",
    responses(
        (status = 200, description = "Simulated community comparison (not real data)", body = CommunityStatsRes)
    )
)]
pub(crate) async fn community_stats(State(state): State<AppState>) -> Json<CommunityStatsRes> {
    Json(CommunityStatsRes {
        community_stats: state.insights.community_stats(),
    })
}

#[utoipa::path(
    get,
    path = "/api/health-timeline",
    responses(
        (status = 200, description = "Synthetic six-month timeline (not real data)", body = HealthTimelineRes)
    )
)]
pub(crate) async fn health_timeline(State(state): State<AppState>) -> Json<HealthTimelineRes> {
    let today = chrono::Local::now().date_naive();
    Json(state.insights.health_timeline(today))
}
