use std::sync::Arc;

use indexmap::IndexMap;
use serenity::all::{GuildId, Http};
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{debug, error};

use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::constants::timeouts::INVITE_REFRESH_INTERVAL;

/// Cached view of one invite between polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteEntry {
    pub uses: u64,
    pub inviter_id: Option<u64>,
}

/// A use of an invite, detected by comparing two polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteUse {
    pub code: String,
    pub uses: u64,
    pub inviter_id: Option<u64>,
    /// The code was absent from the previous poll.
    pub brand_new: bool,
}

/// Snapshot of the guild's invites, diffed on every join to attribute the
/// join to the invite whose counter moved.
#[derive(Debug, Default)]
pub struct InviteTracker {
    snapshot: Mutex<IndexMap<String, InviteEntry>>,
}

impl InviteTracker {
    /// Replace the snapshot with a fresh poll. Returns how many invites the
    /// guild currently has.
    pub async fn update(&self, http: &Http, guild_id: GuildId) -> Result<usize, Error> {
        let fresh = poll_invites(http, guild_id).await?;
        let count = fresh.len();

        *self.snapshot.lock().await = fresh;

        Ok(count)
    }

    /// Poll the guild and compare against the stored snapshot. On a hit the
    /// fresh poll becomes the new snapshot; otherwise the old one stays so
    /// a later retry still diffs against the pre-join state.
    pub async fn detect_use(
        &self,
        http: &Http,
        guild_id: GuildId,
    ) -> Result<Option<InviteUse>, Error> {
        let fresh = poll_invites(http, guild_id).await?;
        let mut snapshot = self.snapshot.lock().await;

        Ok(absorb(&mut snapshot, fresh))
    }
}

/// Diff a fresh poll against the snapshot, committing the poll only on a
/// hit. A miss keeps the snapshot as-is, so the next retry diffs against
/// the same pre-join baseline.
fn absorb(
    snapshot: &mut IndexMap<String, InviteEntry>,
    fresh: IndexMap<String, InviteEntry>,
) -> Option<InviteUse> {
    let hit = diff_snapshots(snapshot, &fresh);

    if hit.is_some() {
        *snapshot = fresh;
    }

    hit
}

/// Start the background task that re-polls invites, so codes created or
/// revoked while nobody joined don't go stale in the snapshot.
pub fn spawn_snapshot_refresh(http: Arc<Http>, data: Arc<Data>) {
    tokio::spawn(async move {
        let mut ticker = interval(INVITE_REFRESH_INTERVAL);
        let guild_id = GuildId::new(data.settings.guild_id);

        loop {
            ticker.tick().await;

            match data.invite_tracker.update(&http, guild_id).await {
                Ok(count) => debug!("Refreshed invite snapshot ({} invites)", count),
                Err(e) => error!("Invite snapshot refresh failed: {:?}", e),
            }
        }
    });
}

/// The invite whose counter moved between `old` and `fresh`.
///
/// A code absent from `old` with at least one use wins outright; otherwise
/// the first known code whose count grew is picked. Two joins landing
/// between polls collapse into a single hit.
fn diff_snapshots(
    old: &IndexMap<String, InviteEntry>,
    fresh: &IndexMap<String, InviteEntry>,
) -> Option<InviteUse> {
    for (code, entry) in fresh {
        if !old.contains_key(code) && entry.uses > 0 {
            return Some(InviteUse {
                code: code.clone(),
                uses: entry.uses,
                inviter_id: entry.inviter_id,
                brand_new: true,
            });
        }
    }

    for (code, entry) in fresh {
        if let Some(known) = old.get(code) {
            if entry.uses > known.uses {
                return Some(InviteUse {
                    code: code.clone(),
                    uses: entry.uses,
                    inviter_id: entry.inviter_id,
                    brand_new: false,
                });
            }
        }
    }

    None
}

async fn poll_invites(
    http: &Http,
    guild_id: GuildId,
) -> Result<IndexMap<String, InviteEntry>, Error> {
    let invites = guild_id.invites(http).await?;

    Ok(invites
        .into_iter()
        .map(|invite| {
            (
                invite.code,
                InviteEntry {
                    uses: invite.uses,
                    inviter_id: invite.inviter.map(|user| user.id.get()),
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, u64)]) -> IndexMap<String, InviteEntry> {
        entries
            .iter()
            .map(|(code, uses)| {
                (
                    code.to_string(),
                    InviteEntry {
                        uses: *uses,
                        inviter_id: Some(42),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_counter_increment_is_attributed() {
        let old = snapshot(&[("abc", 3), ("def", 1)]);
        let fresh = snapshot(&[("abc", 3), ("def", 2)]);

        let hit = diff_snapshots(&old, &fresh).expect("a counter moved");
        assert_eq!(hit.code, "def");
        assert_eq!(hit.uses, 2);
        assert!(!hit.brand_new);
    }

    #[test]
    fn test_brand_new_code_with_a_use_is_attributed() {
        let old = snapshot(&[("abc", 3)]);
        let fresh = snapshot(&[("abc", 3), ("xyz", 1)]);

        let hit = diff_snapshots(&old, &fresh).expect("new code was used");
        assert_eq!(hit.code, "xyz");
        assert!(hit.brand_new);
    }

    #[test]
    fn test_brand_new_unused_code_is_ignored() {
        let old = snapshot(&[("abc", 3)]);
        let fresh = snapshot(&[("abc", 3), ("xyz", 0)]);

        assert!(diff_snapshots(&old, &fresh).is_none());
    }

    #[test]
    fn test_no_change_yields_none() {
        let old = snapshot(&[("abc", 3), ("def", 1)]);
        let fresh = snapshot(&[("abc", 3), ("def", 1)]);

        assert!(diff_snapshots(&old, &fresh).is_none());
    }

    #[test]
    fn test_first_grown_code_wins() {
        let old = snapshot(&[("abc", 3), ("def", 1)]);
        let fresh = snapshot(&[("abc", 4), ("def", 2)]);

        let hit = diff_snapshots(&old, &fresh).expect("counters moved");
        assert_eq!(hit.code, "abc");
    }

    #[test]
    fn test_new_code_wins_over_grown_counter() {
        let old = snapshot(&[("abc", 3)]);
        let fresh = snapshot(&[("abc", 4), ("xyz", 1)]);

        let hit = diff_snapshots(&old, &fresh).expect("both moved");
        assert_eq!(hit.code, "xyz");
        assert!(hit.brand_new);
    }

    #[test]
    fn test_hit_commits_the_fresh_poll() {
        let mut confirmed = snapshot(&[("abc", 3)]);
        let fresh = snapshot(&[("abc", 3), ("xyz", 1)]);

        let hit = absorb(&mut confirmed, fresh.clone()).expect("new code was used");
        assert_eq!(hit.code, "xyz");
        assert_eq!(confirmed, fresh);

        // The join is accounted for; the same poll attributes nothing twice.
        assert!(absorb(&mut confirmed, fresh).is_none());
    }

    #[test]
    fn test_miss_keeps_the_baseline_for_retries() {
        let mut confirmed = snapshot(&[("abc", 3)]);

        assert!(absorb(&mut confirmed, snapshot(&[("abc", 3)])).is_none());
        assert_eq!(confirmed, snapshot(&[("abc", 3)]));

        // The counter registered late; the kept baseline still catches it.
        let hit = absorb(&mut confirmed, snapshot(&[("abc", 4)])).expect("late counter move");
        assert_eq!(hit.code, "abc");
        assert_eq!(hit.uses, 4);
    }

    #[tokio::test]
    async fn test_tracker_starts_empty() {
        let tracker = InviteTracker::default();
        assert!(tracker.snapshot.lock().await.is_empty());
    }
}
