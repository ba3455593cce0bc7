use chrono::{DateTime, Utc};

/// A Minecraft <-> Discord account link. Each side appears at most once.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountLink {
    /// Canonical Minecraft UUID string
    #[sqlx(rename = "id")]
    pub minecraft_id: String,
    pub hash: i64,
    #[sqlx(rename = "time")]
    pub linked_at: DateTime<Utc>,
    #[sqlx(rename = "discord")]
    pub discord_id: i64,
}
