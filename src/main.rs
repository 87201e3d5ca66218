use api_rest::{app, AppState};
use cardio_core::{CoreConfig, ModelHandle, SimulatedInsights};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the CardioCheck service
///
/// Resolves configuration once, loads the classifier artifact once, and serves the HTML form
/// and JSON API. A missing or corrupt artifact is logged and the server still starts; the
/// assessment page then reports that the model is not loaded.
///
/// # Environment Variables
/// - `PORT`: listening port (default: 5000)
/// - `HOST`: bind host (default: "0.0.0.0")
/// - `CARDIO_MODEL_PATH`: model artifact path (default: "best_heart_model.json")
/// - `RUST_LOG`: tracing filter
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `PORT` is not a valid port number,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cardio_run=info".parse()?)
                .add_directive("cardio_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var("HOST").ok(),
        std::env::var("PORT").ok(),
        std::env::var("CARDIO_MODEL_PATH").ok(),
    )?;

    let model = ModelHandle::load(cfg.model_path());
    if !model.is_loaded() {
        tracing::warn!("Serving without a model; assessments will report a load failure");
    }

    let state = AppState::new(model, SimulatedInsights::new());
    let addr = cfg.bind_addr();

    tracing::info!("++ Starting CardioCheck on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("-- Shutting down CardioCheck");
}
