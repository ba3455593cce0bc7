use sqlx::PgPool;

use crate::db::models::WarningRecord;

/// Insert a warning and return the store-assigned ticket number.
pub async fn create(
    pool: &PgPool,
    subject_id: i64,
    reason: &str,
    issuer_id: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO warnings (id, reason, warnee) VALUES ($1, $2, $3) RETURNING ticket",
    )
    .bind(subject_id)
    .bind(reason)
    .bind(issuer_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// How many warnings a subject has accumulated.
pub async fn count_for(pool: &PgPool, subject_id: i64) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM warnings WHERE id = $1")
        .bind(subject_id)
        .fetch_one(pool)
        .await?;

    Ok(row.0)
}

/// The most recent warnings for a subject, newest first.
pub async fn list_for(
    pool: &PgPool,
    subject_id: i64,
    limit: i64,
) -> Result<Vec<WarningRecord>, sqlx::Error> {
    sqlx::query_as::<_, WarningRecord>(
        "SELECT * FROM warnings WHERE id = $1 ORDER BY ticket DESC LIMIT $2",
    )
    .bind(subject_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
