//! Postgres connection and schema setup.

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::infrastructure::ports::RepoError;

/// Connect to Postgres and apply pending migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, RepoError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|err| RepoError::Database(err.to_string()))?;

    tracing::info!("Database schema up to date");
    Ok(pool)
}
