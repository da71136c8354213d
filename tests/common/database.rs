//! PostgreSQL fixtures
//!
//! Tests that need a real database call `pg_store()` and return early when
//! it yields `None`.

use boardwalk::backend::store::PgStore;

pub async fn pg_store() -> Option<PgStore> {
    let url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty())?;
    let store = PgStore::connect(&url, 5).await.expect("Failed to connect to DATABASE_URL");
    store.migrate().await.expect("Failed to run migrations");
    Some(store)
}
