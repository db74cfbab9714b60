use std::time::Duration;

use axum::{routing::get, Json};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{handlers, JwtAuth, UserService};
use events::EventPublisher;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    // Optional: the API runs fine without a broker, it just won't publish.
    let publisher = EventPublisher::connect(&config.broker).await;

    let service = UserService::new(
        db.clone(),
        JwtAuth::new(&config.jwt),
        publisher,
        config.broker.user_created_subject.clone(),
    );

    let app = handlers::router(service)
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)));

    let address = config.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down: closing database connection");
    if let Err(e) = db.close().await {
        tracing::error!("Error closing PostgreSQL: {}", e);
    }

    Ok(())
}

async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
