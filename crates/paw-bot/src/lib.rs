//! # paw-bot
//!
//! The conversational core of pawpoints: a per-user intake state machine,
//! the moderation workflow, approved-only queries with a nearest search, and
//! the ownership guard for deletes and edits.
//!
//! Persistence goes through `paw_core::store::RecordStore`; transports feed
//! one `InboundTurn` at a time to [`Bot::handle`] and render the `Reply`.

pub mod dispatch;
pub mod guard;
pub mod intake;
pub mod moderation;
pub mod query;
pub mod sessions;

pub use dispatch::{Bot, BotSettings};
