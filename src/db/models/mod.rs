mod account_link;
mod message_record;
mod mute_record;
mod warning_record;

pub use account_link::AccountLink;
pub use message_record::MessageRecord;
pub use mute_record::MuteRecord;
pub use warning_record::WarningRecord;
