// SPDX-License-Identifier: MIT

//! Life-Pattern Insights API Server
//!
//! Generates reflective "pattern mirror" readings from a user's form
//! submission via an OpenAI-compatible completion API and serves them
//! back by opaque id.

use lifepattern::{
    config::Config,
    db::PgStore,
    services::{AnalyticsRecorder, AuthClient, OpenAiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment. A missing OPENAI_API_KEY is
    // reported here, before any network attempt.
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Life-Pattern Insights API");

    // Connect to Postgres and run migrations
    let db = Arc::new(
        PgStore::connect(&config.database_url)
            .await
            .expect("Failed to connect to Postgres"),
    );

    // Completion API client (explicit dependency, no global singleton)
    let openai = OpenAiClient::new(&config).expect("Failed to initialize completion client");
    tracing::info!(model = %config.openai_model, "Completion client initialized");

    // External auth collaborator
    let auth = AuthClient::new(&config);

    // Best-effort analytics through the same store
    let analytics = AnalyticsRecorder::new(db.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        openai,
        auth,
        analytics,
    });

    // Build router
    let app = lifepattern::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lifepattern=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
