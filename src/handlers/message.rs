use std::sync::Arc;

use serenity::all::{ChannelId, Context, Message, MessageId, MessageUpdateEvent, Timestamp};
use tracing::{debug, error};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::commands::dispatcher;
use crate::constants::embeds;
use crate::db::queries::message;
use crate::services::audit;
use crate::services::filter::{advertisement, profanity};
use crate::utils::formatting::{mention_channel, mention_user, truncate};

/// Route a fresh message: archive it, then either dispatch a command or run
/// the filter stages.
pub async fn handle(ctx: &Context, data: &Arc<Data>, msg: &Message) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }
    if msg.guild_id.map(|id| id.get()) != Some(data.settings.guild_id) {
        return Ok(());
    }

    // Archive before anything else so a later deletion can be reported.
    if let Err(e) = message::archive(
        &data.pool,
        msg.id.get() as i64,
        Some(&msg.content),
        msg.author.id.get() as i64,
        &msg.author.name,
        msg.channel_id.get() as i64,
    )
    .await
    {
        error!("Could not archive message {}: {:?}", msg.id, e);
    }

    if msg.content.starts_with(&data.settings.command_prefix) {
        return dispatcher::dispatch(ctx, data, msg).await;
    }

    advertisement::handle_message(ctx, data, msg).await;
    profanity::handle_message(ctx, data, msg).await;

    Ok(())
}

/// Re-run the pattern stage over an edited message and refresh its archive
/// row. An edit is how an advertisement sneaks past the fresh-message check.
pub async fn handle_edit(
    ctx: &Context,
    data: &Arc<Data>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) -> Result<(), Error> {
    if event.guild_id.map(|id| id.get()) != Some(data.settings.guild_id) {
        return Ok(());
    }

    let (author, content) = match (new, event.author, event.content) {
        (Some(message), _, _) => (message.author, message.content),
        (None, Some(author), Some(content)) => (author, content),
        // Partial payload without a content change (embed unfurl and such).
        _ => return Ok(()),
    };

    if author.bot {
        return Ok(());
    }

    if let Err(e) = message::archive(
        &data.pool,
        event.id.get() as i64,
        Some(&content),
        author.id.get() as i64,
        &author.name,
        event.channel_id.get() as i64,
    )
    .await
    {
        error!("Could not refresh archived message {}: {:?}", event.id, e);
    }

    if let Some(hit) = advertisement::evaluate(&content) {
        advertisement::act_on_hit(ctx, data, hit, event.channel_id, event.id, author.id, &content)
            .await;
    }

    Ok(())
}

/// Report a deleted message from the archive. Ids that were never archived
/// (bot messages, history from before the bot) stay silent.
pub async fn handle_delete(
    ctx: &Context,
    data: &Arc<Data>,
    channel_id: ChannelId,
    message_id: MessageId,
) -> Result<(), Error> {
    let Some(record) = message::take(&data.pool, message_id.get() as i64).await? else {
        debug!("Deleted message {} was not archived", message_id);
        return Ok(());
    };

    let content = match record.content.as_deref() {
        Some(text) if !text.is_empty() => truncate(text, 1024),
        _ => "(no text content)".to_string(),
    };

    let report = embeds::error_embed()
        .title("Message Deleted")
        .field(
            "Author",
            format!(
                "{} ({})",
                mention_user(record.author_id as u64),
                record.author_name
            ),
            true,
        )
        .field("Channel", mention_channel(channel_id.get()), true)
        .field("Content", content, false)
        .timestamp(Timestamp::now());
    audit::log_embed(&ctx.http, &data.settings, report).await;

    Ok(())
}
