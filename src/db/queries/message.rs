use sqlx::PgPool;

use crate::db::models::MessageRecord;

/// Archive a message. Re-archiving an id refreshes the stored content, so
/// an edited message reports its latest text when deleted.
pub async fn archive(
    pool: &PgPool,
    message_id: i64,
    content: Option<&str>,
    author_id: i64,
    author_name: &str,
    channel_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO messages (id, content, author, author_name, channel)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id)
        DO UPDATE SET content = $2
        "#,
    )
    .bind(message_id)
    .bind(content)
    .bind(author_id)
    .bind(author_name)
    .bind(channel_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch an archived message and remove it in the same transaction. The
/// archive is a single-use cache: the deletion report that reads a row
/// consumes it.
pub async fn take(pool: &PgPool, message_id: i64) -> Result<Option<MessageRecord>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let record = sqlx::query_as::<_, MessageRecord>("SELECT * FROM messages WHERE id = $1")
        .bind(message_id)
        .fetch_optional(&mut *tx)
        .await?;

    if record.is_some() {
        sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(message_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(record)
}
