pub mod link;
pub mod message;
pub mod mute;
pub mod warning;
