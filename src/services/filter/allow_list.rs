use std::time::{Duration, Instant};

use dashmap::DashMap;

/// One-shot advertisement bypass grants, keyed by user id.
///
/// Entries live in memory only; an in-flight grant is lost on restart,
/// which is acceptable for a window this short. All mutation goes through
/// the DashMap, so grants, consumption and cleanup never block each other.
pub struct AllowList {
    entries: DashMap<u64, Instant>,
}

impl AllowList {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Insert a batch of users, each expiring `window` from now. Returns
    /// the shared deadline so the caller can schedule its window-close
    /// announcement.
    pub fn grant(&self, users: &[u64], window: Duration) -> Instant {
        let expires_at = Instant::now() + window;
        for user in users {
            self.entries.insert(*user, expires_at);
        }
        expires_at
    }

    /// Spend a user's bypass if one is active. The entry is removed either
    /// way; a stale entry the cleanup task has not reaped yet must not
    /// grant a bypass.
    pub fn consume_if_present(&self, user_id: u64) -> bool {
        match self.entries.remove(&user_id) {
            Some((_, expires_at)) => Instant::now() < expires_at,
            None => false,
        }
    }

    /// Drop the not-yet-consumed entries of a grant batch. An entry whose
    /// deadline is still in the future was re-granted since this batch and
    /// is left alone.
    pub fn expire_batch(&self, users: &[u64]) {
        for user in users {
            self.entries
                .remove_if(user, |_, expires_at| Instant::now() >= *expires_at);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new()
    }
}
