/**
 * Application State Management
 *
 * `AppState` is cloned into every handler. It holds the store behind a
 * trait object so the same router runs on PostgreSQL or in memory.
 *
 * The `FromRef` implementations let handlers extract only the part they
 * need, e.g. `State<Arc<dyn Store>>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::server::config::ServerConfig;
use crate::backend::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<SessionKeys>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: ServerConfig) -> Self {
        let sessions = SessionKeys::new(&config.jwt_secret, config.token_ttl_secs);
        Self {
            store,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<SessionKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
