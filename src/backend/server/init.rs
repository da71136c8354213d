/**
 * Server Initialization
 *
 * 1. Pick the store: PostgreSQL when `DATABASE_URL` is set (migrations are
 *    applied on startup), the in-memory store otherwise
 * 2. Build `AppState`
 * 3. Create the router
 *
 * A configured database that cannot be reached is a startup error; the
 * server does not silently fall back to memory in that case.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, Store, StoreError};

pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing boardwalk server");
    let store = open_store(&config).await?;
    Ok(build_router(store, config))
}

/// Router over an already opened store
pub fn build_router(store: Arc<dyn Store>, config: ServerConfig) -> Router<()> {
    create_router(AppState::new(store, config))
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn Store>, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgStore::connect(url, config.max_connections).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory store; data is lost on restart.");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
