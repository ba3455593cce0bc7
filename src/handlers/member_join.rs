use std::sync::Arc;

use serenity::all::{ChannelId, Context, CreateMessage, Member, Timestamp};
use tracing::{debug, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::constants::timeouts::{ATTRIBUTION_MAX_ATTEMPTS, ATTRIBUTION_RETRY_DELAY};
use crate::services::audit;
use crate::services::invites::InviteUse;
use crate::utils::formatting::{mention_channel, mention_user};

/// Welcome a new member, then work out which invite brought them in.
pub async fn handle(ctx: &Context, data: &Arc<Data>, member: &Member) -> Result<(), Error> {
    if member.guild_id.get() != data.settings.guild_id {
        return Ok(());
    }

    info!("Member {} joined", member.user.id);

    welcome(ctx, data, member).await;

    // The invite counters lag the join event; poll until they catch up.
    let mut attribution = None;
    for attempt in 1..=ATTRIBUTION_MAX_ATTEMPTS {
        match data
            .invite_tracker
            .detect_use(&ctx.http, member.guild_id)
            .await
        {
            Ok(Some(hit)) => {
                attribution = Some(hit);
                break;
            }
            Ok(None) => {
                debug!(
                    "Attribution attempt {}/{} for member {} was inconclusive",
                    attempt, ATTRIBUTION_MAX_ATTEMPTS, member.user.id
                );
            }
            Err(e) => {
                warn!("Could not poll invites (attempt {}): {:?}", attempt, e);
            }
        }

        if attempt < ATTRIBUTION_MAX_ATTEMPTS {
            tokio::time::sleep(ATTRIBUTION_RETRY_DELAY).await;
        }
    }

    report_attribution(ctx, data, member, attribution).await;

    Ok(())
}

async fn welcome(ctx: &Context, data: &Arc<Data>, member: &Member) {
    let settings = &data.settings;

    let embed = embeds::standard_embed()
        .title("Welcome!")
        .description(format!(
            "{} just joined the server. Have a look at {} before diving in.",
            mention_user(member.user.id.get()),
            mention_channel(settings.rules_channel_id)
        ))
        .timestamp(Timestamp::now());

    let channel = ChannelId::new(settings.announce_channel_id);
    if let Err(e) = channel
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        warn!("Could not welcome member {}: {:?}", member.user.id, e);
    }
}

async fn report_attribution(
    ctx: &Context,
    data: &Arc<Data>,
    member: &Member,
    attribution: Option<InviteUse>,
) {
    let report = match attribution {
        Some(invite) => {
            let inviter = invite
                .inviter_id
                .map(mention_user)
                .unwrap_or_else(|| "unknown".to_string());
            let code = if invite.brand_new {
                format!("`{}` (new)", invite.code)
            } else {
                format!("`{}`", invite.code)
            };

            info!(
                "Member {} joined via invite {} (inviter {:?})",
                member.user.id, invite.code, invite.inviter_id
            );

            embeds::success_embed()
                .title("Member Joined")
                .field("Member", mention_user(member.user.id.get()), true)
                .field("Invite", code, true)
                .field("Created By", inviter, true)
                .field("Uses", invite.uses.to_string(), true)
                .timestamp(Timestamp::now())
        }
        None => {
            warn!("Could not attribute the join of member {}", member.user.id);

            embeds::warning_embed()
                .title("Member Joined")
                .description(format!(
                    "{} joined, but no invite could be attributed.",
                    mention_user(member.user.id.get())
                ))
                .timestamp(Timestamp::now())
        }
    };

    audit::log_embed(&ctx.http, &data.settings, report).await;
}
