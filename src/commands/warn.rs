use serenity::all::Timestamp;
use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::constants::embeds;
use crate::db::queries::warning;
use crate::services::audit;
use crate::utils::formatting::{mention_user, truncate};
use crate::utils::mentions::parse_user_mention;

pub struct Warn;

#[async_trait]
impl Command for Warn {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let subject = cmd
            .args
            .first()
            .and_then(|arg| parse_user_mention(arg))
            .ok_or_else(|| Error::usage("Mention the member to warn."))?;

        let reason = cmd.args[1..].join(" ");
        if reason.is_empty() {
            return Err(Error::usage("Give a reason for the warning."));
        }
        // The reason column is VARCHAR(255).
        let reason = truncate(&reason, 255);

        let ticket = warning::create(
            &cmd.data.pool,
            subject.get() as i64,
            &reason,
            cmd.msg.author.id.get() as i64,
        )
        .await?;

        let reply = format!(
            ":warning: {} has been warned (warning #{}).",
            mention_user(subject.get()),
            ticket
        );
        cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;

        let report = embeds::warning_embed()
            .title(format!("Warning #{}", ticket))
            .field("Member", mention_user(subject.get()), true)
            .field("Moderator", mention_user(cmd.msg.author.id.get()), true)
            .field("Reason", &reason, false)
            .timestamp(Timestamp::now());
        audit::log_embed(&cmd.ctx.http, &cmd.data.settings, report).await;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "warn @user <reason>"
    }

    fn description(&self) -> &'static str {
        "Put a warning on a member's record."
    }
}
