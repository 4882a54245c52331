pub mod activity;
pub mod sessions;
pub mod users;

use once_cell::sync::OnceCell;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config;
use crate::error::ApiError;

static POOL: OnceCell<PgPool> = OnceCell::new();

/// Single accessor for the process-wide connection pool. The pool is created
/// lazily, so a missing `DATABASE_URL` fails the requesting route with a
/// descriptive 500 instead of crashing the process at startup.
pub fn pool() -> Result<&'static PgPool, ApiError> {
    if let Some(pool) = POOL.get() {
        return Ok(pool);
    }

    let cfg = config::config();
    let url = cfg.database.require_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(cfg.database.max_connections)
        .connect_lazy(url)
        .map_err(|e| {
            tracing::error!("Invalid DATABASE_URL: {}", e);
            ApiError::internal_server_error("Invalid database configuration")
        })?;

    Ok(POOL.get_or_init(|| pool))
}

/// Connectivity probe for the health endpoint.
pub async fn health_check() -> Result<(), ApiError> {
    let pool = pool()?;
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
