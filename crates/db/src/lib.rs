//! Persistence layer for the campusnotes backend.
//!
//! Provides the PostgreSQL connection pool, embedded migrations, row models,
//! and one repository struct per table. Repositories return plain
//! `sqlx::Error`; domain classification happens at the API boundary.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!();
    tracing::debug!(count = migrator.migrations.len(), "Running embedded migrations");
    migrator.run(pool).await
}
