use std::{future::Future, net::SocketAddr, sync::Arc};

use configs::{AppConfig, ServerConfig, StorageBackend};
use migration::MigratorTrait;
use service::{
    catalog::{repo::seaorm::SeaOrmFranchiseStore, repository::memory::InMemoryFranchiseStore, FranchiseStore},
    storage::json_file_store::JsonFileFranchiseStore,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`) when present, else environment only.
/// A config file that exists but is malformed is an error.
pub fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::load_and_validate()
}

fn load_bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Open the configured document store. PostgreSQL is migrated on the way up.
pub async fn build_store(cfg: &AppConfig) -> Result<Arc<dyn FranchiseStore>, StartupError> {
    let store: Arc<dyn FranchiseStore> = match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Storage(format!("migration failed: {e}")))?;
            Arc::new(SeaOrmFranchiseStore { db })
        }
        StorageBackend::File => Arc::new(
            JsonFileFranchiseStore::new(&cfg.storage.file_path)
                .await
                .map_err(|e| StartupError::Storage(e.to_string()))?,
        ),
        StorageBackend::Memory => Arc::new(InMemoryFranchiseStore::new()),
    };
    info!(backend = ?cfg.storage.backend, "franchise store ready");
    Ok(store)
}

/// Public entry: build the app and serve until the process is stopped.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(cfg, std::future::pending()).await
}

/// Build the app and serve until `shutdown` resolves, then drain.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = build_store(&cfg).await?;
    let app = routes::build_router(AppState::new(store), build_cors());

    let addr = load_bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "franchise api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("franchise api stopped");
    Ok(())
}
