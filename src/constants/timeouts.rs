use std::time::Duration;

/// Sweep cadence for lifting expired mutes (default, overridable via env)
pub const DEFAULT_SWEEP_INTERVAL_SECONDS: u64 = 30;

/// Advertisement allow-list window (default, overridable via env)
pub const DEFAULT_AD_ALLOW_WINDOW_SECONDS: u64 = 30;

/// Delay between invite attribution attempts while the platform catches up
pub const ATTRIBUTION_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Attribution attempts per join before the join is logged as unattributed
pub const ATTRIBUTION_MAX_ATTEMPTS: u32 = 5;

/// Cadence for refreshing the confirmed invite snapshot between joins
pub const INVITE_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Most recent messages a single backfill may archive (Discord fetch cap)
pub const MESSAGE_BACKFILL_LIMIT: u8 = 100;

/// Render a duration for replies: "45 seconds", "1 minute", "2 hours", "7 days".
pub fn format_duration(duration: Duration) -> String {
    const UNITS: &[(u64, &str)] = &[(86400, "day"), (3600, "hour"), (60, "minute")];

    let secs = duration.as_secs();
    for &(size, name) in UNITS {
        if secs >= size {
            let count = secs / size;
            let plural = if count == 1 { "" } else { "s" };
            return format!("{} {}{}", count, name, plural);
        }
    }
    format!("{} seconds", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(45)), "45 seconds");
        assert_eq!(format_duration(Duration::from_secs(60)), "1 minute");
        assert_eq!(format_duration(Duration::from_secs(10 * 60)), "10 minutes");
        assert_eq!(format_duration(Duration::from_secs(2 * 3600)), "2 hours");
        assert_eq!(format_duration(Duration::from_secs(7 * 86400)), "7 days");
    }
}
