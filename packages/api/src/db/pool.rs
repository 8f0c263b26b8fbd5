//! Database connection pool using the OnceCell pattern.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::error::ApiError;
use crate::settings::settings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool.
pub async fn get_pool() -> Result<&'static PgPool, ApiError> {
    POOL.get_or_try_init(|| async {
        let database = &settings()?.database;

        let pool = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .connect(&database.url)
            .await?;
        Ok::<PgPool, ApiError>(pool)
    })
    .await
}
