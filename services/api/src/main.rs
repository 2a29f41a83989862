use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{AppConfig, AppState, create_router};
use common::{LocalStorage, StorageConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting movie explorer");

    let config = AppConfig::load()?;
    let storage = LocalStorage::on_disk(&StorageConfig::new(config.storage.dir.clone()))?;
    info!("Local storage at {}", config.storage.dir.display());

    let state = AppState::new(storage, config.catalog.clone());

    // Requests arriving before the session is restored get a placeholder
    state.restore_session();

    let app = create_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Movie explorer listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
