/// An archived message, kept so deleted-message reports can show what was
/// removed. Rows are consumed by the report that reads them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    #[sqlx(rename = "id")]
    pub message_id: i64,
    pub content: Option<String>,
    #[sqlx(rename = "author")]
    pub author_id: i64,
    pub author_name: String,
    #[sqlx(rename = "channel")]
    pub channel_id: i64,
}
