pub mod advertisement;
pub mod allow_list;
pub mod profanity;
