use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serenity::all::{ChannelId, Context, Message, MessageId, Timestamp, UserId};
use tracing::{debug, warn};

use crate::bot::data::Data;
use crate::constants::embeds;
use crate::services::audit;
use crate::utils::formatting::{mention_channel, mention_user, truncate};

/// Discord invite links: `discord.gg/..`, `discord.com/invite/..` and the
/// legacy `discordapp.com/invite/..` form.
static ADVERTISEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:https?://)?(?:www\.)?(?:discord\.gg|discord(?:app)?\.com/invite)/[A-Za-z0-9-]+")
        .expect("advertisement pattern is valid")
});

/// Bare IPv4 server addresses, optionally with a port. Octets are
/// range-checked, and four are required, so version strings like `1.2.3`
/// stay clean.
static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?::[0-9]{1,5})?\b")
        .expect("ip pattern is valid")
});

/// Which pattern a message tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternHit {
    Advertisement,
    IpAddress,
}

impl PatternHit {
    pub fn label(&self) -> &'static str {
        match self {
            PatternHit::Advertisement => "Discord invite link",
            PatternHit::IpAddress => "Server IP address",
        }
    }
}

/// Pure pattern check, separated from the gateway so it can be table-tested.
pub fn evaluate(content: &str) -> Option<PatternHit> {
    if ADVERTISEMENT.is_match(content) {
        Some(PatternHit::Advertisement)
    } else if IP_ADDRESS.is_match(content) {
        Some(PatternHit::IpAddress)
    } else {
        None
    }
}

/// Run the pattern stage against a live message.
pub async fn handle_message(ctx: &Context, data: &Arc<Data>, msg: &Message) {
    let Some(hit) = evaluate(&msg.content) else {
        return;
    };

    act_on_hit(ctx, data, hit, msg.channel_id, msg.id, msg.author.id, &msg.content).await;
}

/// Delete the offending message, post the public reply, and report to the
/// log channel, in that order. An author holding an allow-list grant spends
/// it here instead; the grant is one-shot, not a standing exemption.
pub async fn act_on_hit(
    ctx: &Context,
    data: &Arc<Data>,
    hit: PatternHit,
    channel_id: ChannelId,
    message_id: MessageId,
    author_id: UserId,
    content: &str,
) {
    if data.allow_list.consume_if_present(author_id.get()) {
        debug!("User {} spent their advertisement bypass on {:?}", author_id, hit);
        return;
    }

    // The message may already be gone (another stage or a moderator got
    // there first). That must not abort the reply and report steps.
    if let Err(e) = ctx.http.delete_message(channel_id, message_id, None).await {
        warn!("Could not delete advertisement {}: {:?}", message_id, e);
    }

    let reply = format!("{} :eyes: Advertising isn't cool man...", mention_user(author_id.get()));
    if let Err(e) = channel_id.say(&ctx.http, reply).await {
        warn!("Could not post advertisement reply in {}: {:?}", channel_id, e);
    }

    let report = embeds::warning_embed()
        .title("Advertisement Removed")
        .field("Author", mention_user(author_id.get()), true)
        .field("Channel", mention_channel(channel_id.get()), true)
        .field("Trigger", hit.label(), true)
        .field("Content", truncate(content, 1024), false)
        .timestamp(Timestamp::now());

    audit::log_embed(&ctx.http, &data.settings, report).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_invite_links() {
        let cases = [
            "join discord.gg/abc123",
            "https://discord.gg/abc123",
            "http://www.discord.gg/abc123",
            "DISCORD.GG/LOUD",
            "discord.com/invite/abc123",
            "https://discordapp.com/invite/cool-server",
        ];
        for case in cases {
            assert_eq!(evaluate(case), Some(PatternHit::Advertisement), "{}", case);
        }
    }

    #[test]
    fn test_matches_bare_ips() {
        let cases = [
            "come play on 192.168.1.50",
            "1.2.3.4",
            "join 255.255.255.255:25565 now",
            "server is at 8.8.8.8:19132!",
        ];
        for case in cases {
            assert_eq!(evaluate(case), Some(PatternHit::IpAddress), "{}", case);
        }
    }

    #[test]
    fn test_invite_wins_over_ip() {
        // Both patterns present; the advertisement stage reports the link.
        assert_eq!(
            evaluate("discord.gg/abc or 10.0.0.1"),
            Some(PatternHit::Advertisement)
        );
    }

    #[test]
    fn test_ignores_normal_chat() {
        let cases = [
            "hello there",
            "we're on version 1.2.3 now",
            "update 1.20 drops tomorrow",
            "check https://example.com/invite for the event",
            "my favourite number is 999.999.999.999",
            "discord.gg is the site, no code here",
        ];
        for case in cases {
            assert_eq!(evaluate(case), None, "{}", case);
        }
    }

    #[test]
    fn test_ignores_out_of_range_octets() {
        assert_eq!(evaluate("300.1.1.1"), None);
        assert_eq!(evaluate("1.1.1.256"), None);
    }
}
