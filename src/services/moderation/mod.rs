pub mod mute_service;
pub mod sweeper;
