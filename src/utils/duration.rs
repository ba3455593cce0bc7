use std::time::Duration;

/// Upper bound on a parsed duration: ten years. Longer inputs are typos,
/// and the cap keeps expiry epoch arithmetic inside i64.
const MAX_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Parse a short duration like `30s`, `10m`, `2h` or `7d`.
///
/// Zero-length durations are rejected; a mute that expires immediately is
/// always a typo. The unit suffix may be any char, so it is peeled off at
/// its own boundary rather than at a byte offset.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let unit = input.chars().next_back()?;

    let value: u64 = input[..input.len() - unit.len_utf8()].parse().ok()?;
    if value == 0 {
        return None;
    }

    let seconds = match unit {
        's' | 'S' => value,
        'm' | 'M' => value.checked_mul(60)?,
        'h' | 'H' => value.checked_mul(60 * 60)?,
        'd' | 'D' => value.checked_mul(24 * 60 * 60)?,
        _ => return None,
    };
    if seconds > MAX_SECONDS {
        return None;
    }

    Some(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_units() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("10m"), Some(Duration::from_secs(600)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604800)));
        assert_eq!(parse_duration("1D"), Some(Duration::from_secs(86400)));
    }

    #[test]
    fn test_rejects_zero() {
        assert_eq!(parse_duration("0s"), None);
        assert_eq!(parse_duration("0m"), None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("ten minutes"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("-5m"), None);
    }

    #[test]
    fn test_rejects_units_from_other_scripts() {
        // Multibyte suffixes must come back as None, never split mid-char.
        assert_eq!(parse_duration("5м"), None);
        assert_eq!(parse_duration("10分"), None);
        assert_eq!(parse_duration("м"), None);
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(parse_duration("99999999999999999999d"), None);
        assert_eq!(parse_duration("18446744073709551615d"), None);
    }

    #[test]
    fn test_rejects_past_the_cap() {
        assert_eq!(
            parse_duration("3650d"),
            Some(Duration::from_secs(315_360_000))
        );
        assert_eq!(parse_duration("3651d"), None);
        assert_eq!(parse_duration("315360001s"), None);
    }
}
