use hotelier::bootstrap;
use hotelier::config::Config;
use hotelier::infrastructure::http::router::build_router;
use hotelier::infrastructure::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    observability::init(&config)?;
    tracing::info!("Configuration loaded, store backend {:?}", config.store_backend);

    let store = bootstrap::build_store(&config).await?;

    // Build application state
    let state = bootstrap::build_app_state(store, &config).await?;

    // Build router
    let app = build_router(state);

    // Start server
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
