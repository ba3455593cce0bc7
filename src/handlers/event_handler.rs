use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::all::{
    ChannelId, Context, EventHandler, GuildChannel, GuildId, Member, Message, MessageId,
    MessageUpdateEvent, Ready, Role, RoleId, Timestamp, User,
};
use serenity::async_trait;
use tracing::{debug, error, info};

use crate::bot::data::Data;
use crate::constants::embeds;
use crate::handlers::{member_join, message};
use crate::services::moderation::sweeper;
use crate::services::{audit, invites};
use crate::utils::formatting::{mention_channel, mention_role, mention_user};

pub struct Handler {
    data: Arc<Data>,
    background_started: AtomicBool,
}

impl Handler {
    pub fn new(data: Arc<Data>) -> Self {
        Self {
            data,
            background_started: AtomicBool::new(false),
        }
    }

    fn in_guild(&self, guild_id: GuildId) -> bool {
        guild_id.get() == self.data.settings.guild_id
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Bot ready as {}", ready.user.name);

        let guild_id = GuildId::new(self.data.settings.guild_id);
        match self.data.invite_tracker.update(&ctx.http, guild_id).await {
            Ok(count) => info!("Primed invite snapshot ({} invites)", count),
            Err(e) => error!("Could not prime the invite snapshot: {:?}", e),
        }

        // Sessions resume through ready; the background tasks must only
        // spawn once.
        if !self.background_started.swap(true, Ordering::SeqCst) {
            sweeper::spawn_expiry_sweeper(Arc::clone(&ctx.http), Arc::clone(&self.data));
            invites::spawn_snapshot_refresh(Arc::clone(&ctx.http), Arc::clone(&self.data));
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if let Err(e) = message::handle(&ctx, &self.data, &msg).await {
            error!("Message handler error: {:?}", e);
        }
    }

    async fn message_update(
        &self,
        ctx: Context,
        _old: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        if let Err(e) = message::handle_edit(&ctx, &self.data, new, event).await {
            error!("Message edit handler error: {:?}", e);
        }
    }

    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        if guild_id.map(|id| id.get()) != Some(self.data.settings.guild_id) {
            return;
        }

        if let Err(e) = message::handle_delete(&ctx, &self.data, channel_id, message_id).await {
            error!("Message delete handler error: {:?}", e);
        }
    }

    async fn guild_member_addition(&self, ctx: Context, member: Member) {
        if let Err(e) = member_join::handle(&ctx, &self.data, &member).await {
            error!("Member join handler error: {:?}", e);
        }
    }

    async fn guild_ban_addition(&self, ctx: Context, guild_id: GuildId, banned: User) {
        if !self.in_guild(guild_id) {
            return;
        }

        let report = embeds::error_embed()
            .title("Member Banned")
            .field(
                "Member",
                format!("{} ({})", mention_user(banned.id.get()), banned.name),
                false,
            )
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }

    async fn channel_create(&self, ctx: Context, channel: GuildChannel) {
        if !self.in_guild(channel.guild_id) {
            return;
        }

        debug!("Channel {} created", channel.id);

        let report = embeds::info_embed()
            .title("Channel Created")
            .description(format!(
                "{} (`#{}`)",
                mention_channel(channel.id.get()),
                channel.name
            ))
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }

    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        _messages: Option<Vec<Message>>,
    ) {
        if !self.in_guild(channel.guild_id) {
            return;
        }

        debug!("Channel {} deleted", channel.id);

        let report = embeds::info_embed()
            .title("Channel Deleted")
            .description(format!("`#{}`", channel.name))
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }

    async fn guild_role_create(&self, ctx: Context, role: Role) {
        if !self.in_guild(role.guild_id) {
            return;
        }

        let report = embeds::info_embed()
            .title("Role Created")
            .description(format!("{} (`{}`)", mention_role(role.id.get()), role.name))
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }

    async fn guild_role_delete(
        &self,
        ctx: Context,
        guild_id: GuildId,
        role_id: RoleId,
        role: Option<Role>,
    ) {
        if !self.in_guild(guild_id) {
            return;
        }

        let name = role
            .map(|role| role.name)
            .unwrap_or_else(|| role_id.to_string());
        let report = embeds::info_embed()
            .title("Role Deleted")
            .description(format!("`{}`", name))
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }

    async fn guild_role_update(&self, ctx: Context, old: Option<Role>, new: Role) {
        if !self.in_guild(new.guild_id) {
            return;
        }

        let description = match old {
            Some(old) if old.name != new.name => {
                format!("`{}` renamed to `{}`", old.name, new.name)
            }
            _ => format!("{} (`{}`) changed", mention_role(new.id.get()), new.name),
        };

        let report = embeds::info_embed()
            .title("Role Updated")
            .description(description)
            .timestamp(Timestamp::now());
        audit::log_embed(&ctx.http, &self.data.settings, report).await;
    }
}
