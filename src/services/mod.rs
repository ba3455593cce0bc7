pub mod audit;
pub mod filter;
pub mod invites;
pub mod moderation;
