use serenity::async_trait;
use uuid::Uuid;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::db::queries::link;
use crate::utils::formatting::mention_user;
use crate::utils::mentions::parse_user_mention;

pub struct LinkAccounts;

#[async_trait]
impl Command for LinkAccounts {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let raw_uuid = cmd
            .args
            .first()
            .ok_or_else(|| Error::usage("Give the Minecraft account's UUID."))?;

        // Canonical form: lowercase, hyphenated. parse_str accepts both
        // hyphenated and plain inputs.
        let minecraft_id = Uuid::parse_str(raw_uuid)
            .map_err(|_| Error::usage(format!("{:?} is not a valid Minecraft UUID.", raw_uuid)))?
            .to_string();

        let subject = cmd
            .args
            .get(1)
            .and_then(|arg| parse_user_mention(arg))
            .ok_or_else(|| Error::usage("Mention the Discord account to link."))?;

        let discord_id = subject.get() as i64;

        if link::is_linked_either(&cmd.data.pool, &minecraft_id, discord_id).await? {
            let reply = format!(
                ":x: {} or Minecraft account `{}` is already linked.",
                mention_user(subject.get()),
                minecraft_id
            );
            cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;
            return Ok(());
        }

        link::create(
            &cmd.data.pool,
            &minecraft_id,
            link::id_hash(&minecraft_id),
            discord_id,
        )
        .await?;

        let reply = format!(
            ":link: Linked {} to Minecraft account `{}`.",
            mention_user(subject.get()),
            minecraft_id
        );
        cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "linkaccounts <minecraft-uuid> @user"
    }

    fn description(&self) -> &'static str {
        "Link a Minecraft account to a Discord member."
    }
}
