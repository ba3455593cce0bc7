use serenity::all::GetMessages;
use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::constants::timeouts::MESSAGE_BACKFILL_LIMIT;
use crate::db::queries::message;

pub struct MapMessages;

#[async_trait]
impl Command for MapMessages {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let limit = match cmd.args.first() {
            None => MESSAGE_BACKFILL_LIMIT,
            Some(arg) => arg
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=MESSAGE_BACKFILL_LIMIT).contains(n))
                .ok_or_else(|| {
                    Error::usage(format!(
                        "The limit must be a number between 1 and {}.",
                        MESSAGE_BACKFILL_LIMIT
                    ))
                })?,
        };

        let messages = cmd
            .msg
            .channel_id
            .messages(&cmd.ctx.http, GetMessages::new().limit(limit))
            .await?;

        let mut archived = 0usize;
        for message in &messages {
            if message.author.bot {
                continue;
            }

            message::archive(
                &cmd.data.pool,
                message.id.get() as i64,
                Some(&message.content),
                message.author.id.get() as i64,
                &message.author.name,
                message.channel_id.get() as i64,
            )
            .await?;

            archived += 1;
        }

        let reply = format!(
            ":card_box: Archived {} message(s) from this channel.",
            archived
        );
        cmd.msg.channel_id.say(&cmd.ctx.http, reply).await?;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "mapmessages [limit]"
    }

    fn description(&self) -> &'static str {
        "Archive up to `limit` recent messages from this channel (default 100)."
    }
}
