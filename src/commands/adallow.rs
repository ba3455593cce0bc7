use std::sync::Arc;
use std::time::Duration;

use serenity::all::UserId;
use serenity::async_trait;
use tracing::warn;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::utils::mentions::parse_user_mention;

pub struct AdAllow;

#[async_trait]
impl Command for AdAllow {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let users: Vec<u64> = cmd
            .args
            .iter()
            .filter_map(|arg| parse_user_mention(arg))
            .map(UserId::get)
            .collect();

        if users.is_empty() {
            return Err(Error::usage("Mention at least one member to allow."));
        }

        // The grant shouldn't hang around in chat.
        if let Err(e) = cmd.msg.delete(&cmd.ctx.http).await {
            warn!("Could not delete adallow invocation: {:?}", e);
        }

        let window = Duration::from_secs(cmd.data.settings.ad_allow_window_seconds);
        cmd.data.allow_list.grant(&users, window);

        // One cleanup per grant batch; the confirmation fires when the
        // window closes.
        let http = Arc::clone(&cmd.ctx.http);
        let data = Arc::clone(cmd.data);
        let channel_id = cmd.msg.channel_id;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            data.allow_list.expire_batch(&users);

            let notice =
                ":white_check_mark: The mentioned users have been allowed to post an advertisement.";
            if let Err(e) = channel_id.say(&http, notice).await {
                warn!(
                    "Could not announce allow-list expiry in {}: {:?}",
                    channel_id, e
                );
            }
        });

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "adallow @user [@user ...]"
    }

    fn description(&self) -> &'static str {
        "Let the mentioned members post one advertisement within the next window."
    }
}
