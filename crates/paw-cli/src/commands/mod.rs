pub mod chat;
pub mod dispatch;
pub mod moderation;
pub mod points;
pub mod schema;
