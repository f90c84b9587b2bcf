mod config;
mod errors;
mod feedback;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::feedback::FeedbackService;
use crate::llm_client::ModelState;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("sred_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SR&ED report API v{}", env!("CARGO_PKG_VERSION"));

    // Decide the generation mode once for the process lifetime.
    let model = llm_client::startup_probe(&config).await;
    match &model {
        ModelState::Ready(_) => info!(
            "Mode: ai (model '{}' at {})",
            config.model_name,
            config.model_url.as_deref().unwrap_or_default()
        ),
        ModelState::Offline { reason } => {
            warn!("Mode: template ({reason})");
            info!("Reports will be composed from structured templates for this process lifetime.");
        }
    }

    let feedback = Arc::new(FeedbackService::new(&config));
    let existing = feedback.count().await.unwrap_or(0);
    info!(
        "Feedback log: {} ({existing} entries; datasets: {}, {})",
        feedback.log_path().display(),
        feedback.dpo_path().display(),
        feedback.sft_path().display()
    );

    let state = AppState {
        model,
        feedback,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
