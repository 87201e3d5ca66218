//! # API REST
//!
//! REST API and HTML front end for CardioCheck.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Server-rendered assessment page
//! - OpenAPI/Swagger documentation for the JSON routes
//! - REST-specific concerns (JSON rejection mapping, CORS)
//!
//! Uses `cardio-core` for all computation and `api-shared` for response records.

#![warn(rust_2018_idioms)]

mod handlers;
mod page;

use axum::{
    routing::{get, post},
    Router,
};
use cardio_core::{InsightSource, ModelHandle};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use page::render_page;

/// Application state shared across request handlers.
///
/// Both members are initialised once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<ModelHandle>,
    pub insights: Arc<dyn InsightSource>,
}

impl AppState {
    pub fn new(model: ModelHandle, insights: impl InsightSource + 'static) -> Self {
        Self {
            model: Arc::new(model),
            insights: Arc::new(insights),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::health_metrics,
        handlers::risk_factors,
        handlers::community_stats,
        handlers::health_timeline,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::HealthMetricsRes,
        api_shared::HeartRateZone,
        api_shared::HeartZone,
        api_shared::BmiCategory,
        api_shared::BmiClass,
        api_shared::CholesterolLevel,
        api_shared::CholesterolClass,
        api_shared::FitnessLevel,
        api_shared::FitnessClass,
        api_shared::RiskFactorsRes,
        api_shared::RiskFactor,
        api_shared::RiskLevel,
        api_shared::RiskValue,
        api_shared::CommunityStatsRes,
        api_shared::CommunityStat,
        api_shared::HealthTimelineRes,
    ))
)]
pub struct ApiDoc;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::assess))
        .route("/new-assessment", get(handlers::new_assessment))
        .route("/health", get(handlers::health))
        .route("/api/health-metrics", post(handlers::health_metrics))
        .route("/api/risk-factors", post(handlers::risk_factors))
        .route("/api/community-stats", get(handlers::community_stats))
        .route("/api/health-timeline", get(handlers::health_timeline))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
