use chrono::Utc;
use serenity::all::{CreateMessage, Timestamp};
use serenity::async_trait;

use crate::bot::error::Error;
use crate::commands::dispatcher::{Command, CommandContext};
use crate::constants::embeds;
use crate::db::queries::{link, mute, warning};
use crate::utils::formatting::{mention_role, mention_user, relative_timestamp};
use crate::utils::mentions::parse_user_mention;

/// Most recent warnings shown on the report.
const RECENT_WARNINGS: i64 = 3;

pub struct WhoIs;

#[async_trait]
impl Command for WhoIs {
    async fn execute(&self, cmd: &CommandContext<'_>) -> Result<(), Error> {
        let subject = cmd
            .args
            .first()
            .and_then(|arg| parse_user_mention(arg))
            .ok_or_else(|| Error::usage("Mention the member to look up."))?;

        let pool = &cmd.data.pool;
        let subject_id = subject.get() as i64;

        let link = link::get_by_discord(pool, subject_id).await?;
        let warning_count = warning::count_for(pool, subject_id).await?;
        let recent = warning::list_for(pool, subject_id, RECENT_WARNINGS).await?;
        let mutes = mute::list_for_subject(pool, subject_id).await?;

        let minecraft = match &link {
            Some(link) => format!(
                "`{}` (linked {})",
                link.minecraft_id,
                relative_timestamp(link.linked_at.timestamp())
            ),
            None => "Not linked".to_string(),
        };

        let now = Utc::now().timestamp();
        let active_mutes: Vec<String> = mutes
            .iter()
            .filter(|record| !record.is_expired(now))
            .map(|record| {
                format!(
                    "{} {} lifts {}",
                    embeds::BULLET,
                    mention_role(record.role_id as u64),
                    relative_timestamp(record.expires)
                )
            })
            .collect();
        let mutes_text = if active_mutes.is_empty() {
            "None".to_string()
        } else {
            active_mutes.join("\n")
        };

        let mut embed = embeds::standard_embed()
            .title("Member Report")
            .field("Member", mention_user(subject.get()), true)
            .field("Minecraft Account", minecraft, true)
            .field("Warnings", warning_count.to_string(), true)
            .field("Active Mutes", mutes_text, false)
            .timestamp(Timestamp::now());

        if !recent.is_empty() {
            let lines: Vec<String> = recent
                .iter()
                .map(|w| format!("{} #{}: {}", embeds::BULLET, w.ticket, w.reason))
                .collect();
            embed = embed.field("Recent Warnings", lines.join("\n"), false);
        }

        cmd.msg
            .channel_id
            .send_message(&cmd.ctx.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(())
    }

    fn usage(&self) -> &'static str {
        "whois @user"
    }

    fn description(&self) -> &'static str {
        "Show a member's account link, warnings and active mutes."
    }

    fn staff_only(&self) -> bool {
        false
    }
}
