use serenity::all::UserId;

/// Parse a `<@id>` (or legacy `<@!id>`) user mention.
pub fn parse_user_mention(arg: &str) -> Option<UserId> {
    let digits = arg
        .strip_prefix("<@")?
        .strip_suffix('>')?
        .trim_start_matches('!');

    digits
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(UserId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_mention() {
        assert_eq!(parse_user_mention("<@123>"), Some(UserId::new(123)));
    }

    #[test]
    fn test_nickname_mention() {
        assert_eq!(parse_user_mention("<@!123>"), Some(UserId::new(123)));
    }

    #[test]
    fn test_rejects_non_mentions() {
        assert_eq!(parse_user_mention("123"), None);
        assert_eq!(parse_user_mention("@everyone"), None);
        assert_eq!(parse_user_mention("<@abc>"), None);
        assert_eq!(parse_user_mention("<@0>"), None);
        assert_eq!(parse_user_mention("<#123>"), None);
    }
}
