//! Per-user live conversations behind a sharded concurrent map.
//!
//! A user has at most one conversation: a submission in progress or a
//! nearest search waiting for its origin. Idle users have no entry.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use paw_core::policy::UserId;

use crate::intake::IntakeSession;

/// What a user's next free-form turn belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversation {
    Intake(IntakeSession),
    NearestSearch,
}

impl Conversation {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Intake(_) => "intake",
            Self::NearestSearch => "nearest_search",
        }
    }
}

/// `user_id -> Conversation`, safe for one task per inbound turn.
///
/// Guards never escape this type, so no shard lock is held across an await.
#[derive(Debug, Default)]
pub struct SessionMap {
    inner: DashMap<UserId, Conversation>,
}

impl SessionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `conversation`, replacing any live one. Returns the replaced one.
    pub fn begin(&self, user: UserId, conversation: Conversation) -> Option<Conversation> {
        self.inner.insert(user, conversation)
    }

    /// Drop the user's conversation.
    pub fn end(&self, user: UserId) -> Option<Conversation> {
        self.inner.remove(&user).map(|(_, conversation)| conversation)
    }

    /// Put `conversation` back unless the user started a new one meanwhile.
    pub fn restore(&self, user: UserId, conversation: Conversation) {
        self.inner.entry(user).or_insert(conversation);
    }

    /// Run `f` against the live conversation under its shard lock.
    ///
    /// `f` returns its result and whether the entry should be removed.
    /// Returns `None` when the user is idle.
    pub fn update<R>(
        &self,
        user: UserId,
        f: impl FnOnce(&mut Conversation) -> (R, bool),
    ) -> Option<R> {
        match self.inner.entry(user) {
            Entry::Vacant(_) => None,
            Entry::Occupied(mut entry) => {
                let (result, finished) = f(entry.get_mut());
                if finished {
                    entry.remove();
                }
                Some(result)
            }
        }
    }

    /// Snapshot of the user's conversation.
    #[must_use]
    pub fn get(&self, user: UserId) -> Option<Conversation> {
        self.inner.get(&user).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
