/// API сервер прогнозирования времени обслуживания

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use service_predictor::{
    server::{router, AppState},
    ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("SERVICE_CONFIG") {
        Ok(path) => ServerConfig::load(&PathBuf::from(&path))
            .with_context(|| format!("loading config {}", path))?,
        Err(_) => ServerConfig::default(),
    }
    .with_env()?;

    // Инициализация логирования
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState::new(&config);
    tracing::info!("=== SERVICE PREDICTOR STARTED ===");
    tracing::info!("Available car models in inventory: {:?}", state.inventory_models().await);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Server listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
