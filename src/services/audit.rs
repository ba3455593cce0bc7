use serenity::all::{ChannelId, CreateEmbed, CreateMessage, Http};
use tracing::warn;

use crate::config::Settings;

/// Post a report embed to the staff log channel.
///
/// Failures are logged and swallowed; reporting must never take the action
/// that triggered it down with it.
pub async fn log_embed(http: &Http, settings: &Settings, embed: CreateEmbed) {
    let channel = ChannelId::new(settings.log_channel_id);
    let message = CreateMessage::new().embed(embed);

    if let Err(e) = channel.send_message(http, message).await {
        warn!("Could not post to log channel {}: {:?}", channel, e);
    }
}
