use serenity::all::CreateMessage;
use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::constants::embeds;

pub struct Help;

#[async_trait]
impl Command for Help {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let prefix = &cmd.data.settings.command_prefix;

        let mut embed = embeds::info_embed().title("Commands");
        for (_, command) in cmd.data.dispatcher.entries() {
            let heading = format!("{}{}", prefix, command.usage());
            embed = embed.field(heading, command.description(), false);
        }

        cmd.msg
            .channel_id
            .send_message(&cmd.ctx.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "List every command."
    }

    fn staff_only(&self) -> bool {
        false
    }
}
