/// Format a user mention
pub fn mention_user(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: u64) -> String {
    format!("<#{}>", channel_id)
}

/// Format a role mention
pub fn mention_role(role_id: u64) -> String {
    format!("<@&{}>", role_id)
}

/// Discord's relative-timestamp markup for an epoch-seconds value
pub fn relative_timestamp(epoch_seconds: i64) -> String {
    format!("<t:{}:R>", epoch_seconds)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions() {
        assert_eq!(mention_user(42), "<@42>");
        assert_eq!(mention_channel(42), "<#42>");
        assert_eq!(mention_role(42), "<@&42>");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }
}
