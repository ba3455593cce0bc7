use std::sync::Arc;
use std::time::Duration;

use serenity::all::{GuildId, Http, RoleId, UserId};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::db::queries::mute;

/// Start the background task that lifts expired mutes.
///
/// Expiries live in the database, so mutes issued before a restart are still
/// picked up by the first pass.
pub fn spawn_expiry_sweeper(http: Arc<Http>, data: Arc<Data>) {
    let period = Duration::from_secs(data.settings.sweep_interval_seconds);

    tokio::spawn(async move {
        let mut ticker = interval(period);

        loop {
            ticker.tick().await;

            if let Err(e) = sweep(&http, &data).await {
                error!("Mute sweep failed: {:?}", e);
            }
        }
    });
}

/// Lift every mute whose expiry has passed.
async fn sweep(http: &Http, data: &Arc<Data>) -> Result<(), Error> {
    let now = chrono::Utc::now().timestamp();
    let expired = mute::get_expired(&data.pool, now).await?;

    if expired.is_empty() {
        return Ok(());
    }

    debug!("Sweeping {} expired mute(s)", expired.len());

    let guild_id = GuildId::new(data.settings.guild_id);

    for record in expired {
        let subject_id = UserId::new(record.subject_id as u64);
        let role_id = RoleId::new(record.role_id as u64);

        // The row is reaped below whether or not the role comes off; a
        // record the guild can no longer act on must not be rescanned
        // forever.
        match guild_id.member(http, subject_id).await {
            Ok(member) => {
                if let Err(e) = member.remove_role(http, role_id).await {
                    warn!(
                        "Could not remove role {} from user {}: {:?}",
                        role_id, subject_id, e
                    );
                }
            }
            Err(e) => {
                // Member left the guild; the role left with them.
                debug!(
                    "Member {} not found while lifting mute #{}: {:?}",
                    subject_id, record.ticket, e
                );
            }
        }

        // Only reap the row that was scanned. A re-mute issued since the
        // scan carries a newer expiry and must stay.
        if mute::delete_expired(&data.pool, record.ticket, record.expires).await? {
            info!(
                "Lifted mute #{} for user {} (role {})",
                record.ticket, subject_id, role_id
            );
        }
    }

    Ok(())
}
