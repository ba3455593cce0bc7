use std::env;

use crate::constants::timeouts::{
    DEFAULT_AD_ALLOW_WINDOW_SECONDS, DEFAULT_SWEEP_INTERVAL_SECONDS,
};
use crate::services::filter::profanity;

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// The single guild this bot serves; events from elsewhere are ignored
    pub guild_id: u64,
    /// Channel receiving structured moderation reports
    pub log_channel_id: u64,
    /// Channel where new members are welcomed
    pub announce_channel_id: u64,
    /// Channel the welcome message points new members at
    pub rules_channel_id: u64,
    /// Role applied by a text mute
    pub mute_role_id: u64,
    /// Role applied by a voice mute
    pub voice_mute_role_id: u64,
    /// Role required to use moderation commands
    pub staff_role_id: u64,
    pub command_prefix: String,
    pub sweep_interval_seconds: u64,
    pub ad_allow_window_seconds: u64,
    pub profanity_api_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, String> {
        let discord_token = required("DISCORD_TOKEN")?;
        let database_url = required("DATABASE_URL")?;

        let guild_id = required_id("GUILD_ID")?;
        let log_channel_id = required_id("LOG_CHANNEL_ID")?;
        let announce_channel_id = required_id("ANNOUNCE_CHANNEL_ID")?;
        let rules_channel_id = required_id("RULES_CHANNEL_ID")?;
        let mute_role_id = required_id("MUTE_ROLE_ID")?;
        let voice_mute_role_id = required_id("VOICE_MUTE_ROLE_ID")?;
        let staff_role_id = required_id("STAFF_ROLE_ID")?;

        let command_prefix = env::var("COMMAND_PREFIX")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "!".to_string());

        let sweep_interval_seconds = optional_u64("SWEEP_INTERVAL_SECONDS")?
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECONDS);
        if sweep_interval_seconds == 0 {
            return Err("SWEEP_INTERVAL_SECONDS must be greater than zero".to_string());
        }

        let ad_allow_window_seconds = optional_u64("AD_ALLOW_WINDOW_SECONDS")?
            .unwrap_or(DEFAULT_AD_ALLOW_WINDOW_SECONDS);
        if ad_allow_window_seconds == 0 {
            return Err("AD_ALLOW_WINDOW_SECONDS must be greater than zero".to_string());
        }

        let profanity_api_url = env::var("PROFANITY_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| profanity::DEFAULT_API_URL.to_string());

        Ok(Self {
            discord_token,
            database_url,
            guild_id,
            log_channel_id,
            announce_channel_id,
            rules_channel_id,
            mute_role_id,
            voice_mute_role_id,
            staff_role_id,
            command_prefix,
            sweep_interval_seconds,
            ad_allow_window_seconds,
            profanity_api_url,
        })
    }
}

fn required(name: &str) -> Result<String, String> {
    env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("{} environment variable not set", name))
}

/// Discord snowflake ids are unsigned 64-bit and never zero.
fn required_id(name: &str) -> Result<u64, String> {
    let raw = required(name)?;
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(format!("{} must be a valid Discord id, got {:?}", name, raw)),
        Ok(id) => Ok(id),
    }
}

fn optional_u64(name: &str) -> Result<Option<u64>, String> {
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| format!("{} must be a number, got {:?}", name, raw)),
        _ => Ok(None),
    }
}
