pub mod messages;
pub mod time;
