/// An append-only warning. Tickets are assigned by the store and strictly
/// increase. Column names predate this codebase: `id` is the warned user,
/// `warnee` the issuing moderator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WarningRecord {
    pub ticket: i64,
    #[sqlx(rename = "id")]
    pub subject_id: i64,
    pub reason: String,
    #[sqlx(rename = "warnee")]
    pub issuer_id: i64,
}
