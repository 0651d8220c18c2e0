use axum::http::StatusCode;
use clap::Parser;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genoquery::{
    Config,
    handlers::{AppState, create_router},
    storage::{GenomeStore, LocalStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create and initialize the genome store
    let store = Arc::new(LocalStore::new(config.preload.clone()));
    store.init().await?;

    let state = AppState::new(store);
    let version = state.version.clone();

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                config.request_timeout(),
            ))
            .option_layer(config.cors.then(CorsLayer::permissive)),
    );

    let addr = config.bind_addr();
    tracing::info!(addr = %addr, version = %version, "Running genoquery server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
