use sqlx::PgPool;

use crate::db::models::MuteRecord;

/// Insert a mute. A second mute for the same (subject, role) pair replaces
/// the stored expiry instead of stacking a duplicate row.
pub async fn upsert(
    pool: &PgPool,
    subject_id: i64,
    issuer_id: i64,
    expires: i64,
    role_id: i64,
) -> Result<MuteRecord, sqlx::Error> {
    sqlx::query_as::<_, MuteRecord>(
        r#"
        INSERT INTO mutes (id, muter, expires, type)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id, type)
        DO UPDATE SET muter = $2, expires = $3, time = NOW()
        RETURNING *
        "#,
    )
    .bind(subject_id)
    .bind(issuer_id)
    .bind(expires)
    .bind(role_id)
    .fetch_one(pool)
    .await
}

/// All mutes whose expiry has passed.
pub async fn get_expired(pool: &PgPool, now: i64) -> Result<Vec<MuteRecord>, sqlx::Error> {
    sqlx::query_as::<_, MuteRecord>(
        "SELECT * FROM mutes WHERE expires < $1 ORDER BY expires ASC",
    )
    .bind(now)
    .fetch_all(pool)
    .await
}

/// Delete a scanned row only while its expiry still matches the scan. A
/// concurrent re-mute bumps `expires`, and the replacement row must survive
/// the sweep that observed the old one.
pub async fn delete_expired(
    pool: &PgPool,
    ticket: i64,
    expires: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM mutes WHERE ticket = $1 AND expires = $2")
        .bind(ticket)
        .bind(expires)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// The active mute for a (subject, role) pair, if any.
pub async fn get_active(
    pool: &PgPool,
    subject_id: i64,
    role_id: i64,
) -> Result<Option<MuteRecord>, sqlx::Error> {
    sqlx::query_as::<_, MuteRecord>("SELECT * FROM mutes WHERE id = $1 AND type = $2")
        .bind(subject_id)
        .bind(role_id)
        .fetch_optional(pool)
        .await
}

/// All mutes currently on record for a subject.
pub async fn list_for_subject(
    pool: &PgPool,
    subject_id: i64,
) -> Result<Vec<MuteRecord>, sqlx::Error> {
    sqlx::query_as::<_, MuteRecord>(
        "SELECT * FROM mutes WHERE id = $1 ORDER BY expires ASC",
    )
    .bind(subject_id)
    .fetch_all(pool)
    .await
}
