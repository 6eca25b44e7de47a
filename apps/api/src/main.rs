mod config;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::recommendation::artifacts::load_recommender;
use crate::recommendation::MODEL_VERSION;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Career Recommendation API v{} (model {MODEL_VERSION})",
        env!("CARGO_PKG_VERSION")
    );

    // Load model artifacts. A failure degrades /predict to 503 but keeps serving health checks.
    let recommender = match load_recommender(&config) {
        Ok(recommender) => {
            info!(
                "Model loaded ({} feature columns)",
                recommender.schema().len()
            );
            Some(Arc::new(recommender))
        }
        Err(e) => {
            warn!("Failed to load model: {e}. /predict will return 503 until restart.");
            None
        }
    };

    let state = AppState { recommender };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
