use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

pub mod models;
pub mod users;

pub use users::{StoreError, UserStore};

/// Build the process-wide connection pool. Connections are opened lazily but
/// every acquisition is bounded by the configured connect timeout; the pool
/// handle itself is cheap to clone and shared read-only across requests.
pub fn pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_lazy(&config.url)
}

/// Run pending migrations and report connectivity. A missing database is
/// logged, not fatal: the routing and gating surface stays serviceable and
/// store-backed operations surface their own errors per request.
pub async fn prepare(pool: &PgPool) {
    match sqlx::migrate!().run(pool).await {
        Ok(()) => tracing::info!("connected, database migrations up to date"),
        Err(e) => tracing::warn!("database not reachable at startup: {}", e),
    }
}
