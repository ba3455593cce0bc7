use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Connect with a bounded pool. The acquire timeout doubles as the uniform
/// deadline on store calls.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("Database connection established");

    Ok(pool)
}

/// Apply the schema. Statements are `CREATE TABLE IF NOT EXISTS`, so a rerun
/// against an initialized database is a no-op.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA.split(';') {
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }

        if let Err(e) = sqlx::query(statement).execute(pool).await {
            // Concurrent startups can still race each other to the CREATE.
            let text = e.to_string();
            if text.contains("already exists") || text.contains("duplicate key") {
                debug!("Skipping schema statement, object already exists");
                continue;
            }
            return Err(e);
        }
    }

    info!("Database schema is up to date");
    Ok(())
}
