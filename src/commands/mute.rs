use chrono::Utc;
use serenity::all::{GuildId, RoleId, Timestamp};
use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::constants::embeds;
use crate::constants::timeouts::format_duration;
use crate::services::audit;
use crate::services::moderation::mute_service::{self, MuteOutcome};
use crate::utils::duration::parse_duration;
use crate::utils::formatting::{mention_user, relative_timestamp};
use crate::utils::mentions::parse_user_mention;

pub struct Mute;

#[async_trait]
impl Command for Mute {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let subject = cmd
            .args
            .first()
            .and_then(|arg| parse_user_mention(arg))
            .ok_or_else(|| Error::usage("Mention the member to mute."))?;

        let duration = cmd
            .args
            .get(1)
            .and_then(|arg| parse_duration(arg))
            .ok_or_else(|| Error::usage("Give a duration like `30s`, `10m`, `2h` or `7d`."))?;

        let voice = match cmd.args.get(2) {
            None => false,
            Some(arg) if arg.eq_ignore_ascii_case("voice") => true,
            Some(arg) => {
                return Err(Error::usage(format!("Unrecognized argument {:?}.", arg)));
            }
        };

        let settings = &cmd.data.settings;
        let role_id = if voice {
            settings.voice_mute_role_id
        } else {
            settings.mute_role_id
        };
        let expires = Utc::now().timestamp() + duration.as_secs() as i64;

        let (outcome, record) = mute_service::mute_member(
            cmd.ctx,
            cmd.data,
            GuildId::new(settings.guild_id),
            subject,
            cmd.msg.author.id,
            RoleId::new(role_id),
            expires,
        )
        .await?;

        let kind = if voice { "voice" } else { "text" };
        let reply = match outcome {
            MuteOutcome::Created => format!(
                ":mute: {} is {} muted for {} (lifts {}).",
                mention_user(subject.get()),
                kind,
                format_duration(duration),
                relative_timestamp(record.expires),
            ),
            MuteOutcome::Replaced => format!(
                ":mute: {} was already {} muted; the mute now lifts {}.",
                mention_user(subject.get()),
                kind,
                relative_timestamp(record.expires),
            ),
        };
        cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;

        let report = embeds::standard_embed()
            .title("Member Muted")
            .field("Member", mention_user(subject.get()), true)
            .field("Moderator", mention_user(cmd.msg.author.id.get()), true)
            .field("Kind", kind, true)
            .field("Lifts", relative_timestamp(record.expires), true)
            .timestamp(Timestamp::now());
        audit::log_embed(&cmd.ctx.http, settings, report).await;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "mute @user <duration> [voice]"
    }

    fn description(&self) -> &'static str {
        "Mute a member for a while (`30s`, `10m`, `2h`, `7d`). `voice` mutes voice instead of text."
    }
}
