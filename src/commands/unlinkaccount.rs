use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::db::queries::link;
use crate::utils::formatting::mention_user;
use crate::utils::mentions::parse_user_mention;

pub struct UnlinkAccount;

#[async_trait]
impl Command for UnlinkAccount {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let subject = cmd
            .args
            .first()
            .and_then(|arg| parse_user_mention(arg))
            .ok_or_else(|| Error::usage("Mention the member to unlink."))?;

        let removed = link::delete_by_discord(&cmd.data.pool, subject.get() as i64).await?;

        let reply = if removed {
            format!(
                ":unlink: Unlinked {} from their Minecraft account.",
                mention_user(subject.get())
            )
        } else {
            format!("{} has no linked Minecraft account.", mention_user(subject.get()))
        };
        cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "unlinkaccount @user"
    }

    fn description(&self) -> &'static str {
        "Remove a member's Minecraft account link."
    }
}
