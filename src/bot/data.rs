use std::fmt;

use sqlx::PgPool;

use crate::commands::dispatcher::Dispatcher;
use crate::config::Settings;
use crate::services::filter::allow_list::AllowList;
use crate::services::filter::profanity::ProfanityClient;
use crate::services::invites::InviteTracker;

/// Shared data available to all commands and handlers
pub struct Data {
    pub pool: PgPool,
    pub settings: Settings,
    /// One-shot advertisement bypasses granted by `adallow`
    pub allow_list: AllowList,
    /// Confirmed invite snapshot for join attribution
    pub invite_tracker: InviteTracker,
    /// External profanity classifier
    pub classifier: ProfanityClient,
    /// Chat command roster
    pub dispatcher: Dispatcher,
}

impl Data {
    pub fn new(
        pool: PgPool,
        settings: Settings,
        classifier: ProfanityClient,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            pool,
            settings,
            allow_list: AllowList::new(),
            invite_tracker: InviteTracker::default(),
            classifier,
            dispatcher,
        }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("guild_id", &self.settings.guild_id)
            .field("allow_list_count", &self.allow_list.len())
            .finish_non_exhaustive()
    }
}
