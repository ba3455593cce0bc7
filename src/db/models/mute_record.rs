use chrono::{DateTime, Utc};

/// A timed mute. The persisted `type` column holds the role id that was
/// applied, which is also what the sweeper removes on expiry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MuteRecord {
    pub ticket: i64,
    #[sqlx(rename = "id")]
    pub subject_id: i64,
    #[sqlx(rename = "time")]
    pub muted_at: DateTime<Utc>,
    #[sqlx(rename = "muter")]
    pub issuer_id: i64,
    /// Expiry as epoch seconds
    pub expires: i64,
    #[sqlx(rename = "type")]
    pub role_id: i64,
}

impl MuteRecord {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires < now
    }
}
