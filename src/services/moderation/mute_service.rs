use std::sync::Arc;

use serenity::all::{Context, GuildId, RoleId, UserId};
use tracing::info;

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::models::MuteRecord;
use crate::db::queries::mute;

/// What a mute request did for the (subject, role) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteOutcome {
    /// No mute was on record; a new one was opened.
    Created,
    /// A mute was already on record; its expiry was replaced.
    Replaced,
}

/// Mute a member: apply the role, then record the expiry.
///
/// The role is applied before the row is written so a database failure never
/// leaves a recorded mute the member can talk through.
pub async fn mute_member(
    ctx: &Context,
    data: &Arc<Data>,
    guild_id: GuildId,
    subject_id: UserId,
    issuer_id: UserId,
    role_id: RoleId,
    expires: i64,
) -> Result<(MuteOutcome, MuteRecord), Error> {
    let member = guild_id.member(ctx, subject_id).await?;
    member.add_role(ctx, role_id).await?;

    let outcome =
        match mute::get_active(&data.pool, subject_id.get() as i64, role_id.get() as i64).await? {
            Some(_) => MuteOutcome::Replaced,
            None => MuteOutcome::Created,
        };

    let record = mute::upsert(
        &data.pool,
        subject_id.get() as i64,
        issuer_id.get() as i64,
        expires,
        role_id.get() as i64,
    )
    .await?;

    info!(
        "User {} muted user {} with role {} until epoch {}",
        issuer_id, subject_id, role_id, expires
    );

    Ok((outcome, record))
}
