use sqlx::PgPool;

use crate::db::models::AccountLink;

/// Hash stored alongside the Minecraft id, FNV-1a over the id bytes. The
/// column is legacy; other consumers of the table still read it.
pub fn id_hash(id: &str) -> i64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in id.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash as i64
}

/// Record a new account link.
pub async fn create(
    pool: &PgPool,
    minecraft_id: &str,
    hash: i64,
    discord_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO links (id, hash, discord) VALUES ($1, $2, $3)")
        .bind(minecraft_id)
        .bind(hash)
        .bind(discord_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// True when either side of the proposed link is already taken.
pub async fn is_linked_either(
    pool: &PgPool,
    minecraft_id: &str,
    discord_id: i64,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM links WHERE id = $1 OR discord = $2)",
    )
    .bind(minecraft_id)
    .bind(discord_id)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// True when the Discord account is linked to any Minecraft account.
pub async fn is_discord_linked(pool: &PgPool, discord_id: i64) -> Result<bool, sqlx::Error> {
    let row: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM links WHERE discord = $1)")
            .bind(discord_id)
            .fetch_one(pool)
            .await?;

    Ok(row.0)
}

pub async fn get_by_discord(
    pool: &PgPool,
    discord_id: i64,
) -> Result<Option<AccountLink>, sqlx::Error> {
    sqlx::query_as::<_, AccountLink>("SELECT * FROM links WHERE discord = $1")
        .bind(discord_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_by_minecraft_id(
    pool: &PgPool,
    minecraft_id: &str,
) -> Result<Option<AccountLink>, sqlx::Error> {
    sqlx::query_as::<_, AccountLink>("SELECT * FROM links WHERE id = $1")
        .bind(minecraft_id)
        .fetch_optional(pool)
        .await
}

/// Remove a link by its Discord side. Returns whether a link existed.
pub async fn delete_by_discord(pool: &PgPool, discord_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM links WHERE discord = $1")
        .bind(discord_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_hash_is_stable() {
        let id = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
        assert_eq!(id_hash(id), id_hash(id));
        assert_ne!(id_hash(id), id_hash("069a79f4-44e9-4726-a5be-fca90e38aaf6"));
    }

    #[test]
    fn test_id_hash_empty_is_offset_basis() {
        assert_eq!(id_hash("") as u64, 0xcbf2_9ce4_8422_2325);
    }
}
