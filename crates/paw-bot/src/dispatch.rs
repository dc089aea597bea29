//! Turn dispatcher.
//!
//! Commands and actions are routed by name and kind. Location, text, and image
//! turns are routed by the user's live conversation: a submission in progress,
//! a nearest search waiting for its origin, or nothing.

use std::sync::Arc;

use paw_config::PawConfig;
use paw_core::entities::{NearbyPoint, PointRecord};
use paw_core::enums::ActionKind;
use paw_core::errors::CoreError;
use paw_core::geo::Coordinate;
use paw_core::policy::{Identity, ModerationPolicy, Requester, UserId};
use paw_core::responses::{ModerationStats, Prompt, Reply};
use paw_core::store::RecordStore;
use paw_core::turns::{Action, Command, InboundTurn, Turn};
use paw_core::updates::PointUpdate;

use crate::guard;
use crate::intake::{IntakeRules, IntakeSession, Step};
use crate::moderation;
use crate::query;
use crate::sessions::{Conversation, SessionMap};

/// Tunables taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    pub rules: IntakeRules,
    /// `k` for nearest queries that do not name one.
    pub nearest_limit: usize,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self::from(&PawConfig::default())
    }
}

impl From<&PawConfig> for BotSettings {
    fn from(config: &PawConfig) -> Self {
        Self {
            rules: IntakeRules::from(&config.intake),
            nearest_limit: usize::try_from(config.query.nearest_limit).unwrap_or(usize::MAX),
        }
    }
}

struct Inner {
    store: Arc<dyn RecordStore>,
    sessions: SessionMap,
    settings: BotSettings,
}

/// The submission/moderation/query core.
///
/// Cheap to clone; every clone shares the store and the session map, so a
/// transport can hand one to each turn's task.
#[derive(Clone)]
pub struct Bot {
    inner: Arc<Inner>,
}

/// Where a conversational turn landed.
enum Routed {
    Idle,
    NearestOrigin(Coordinate),
    Rejected { reason: String, prompt: Prompt },
    Advanced(Prompt),
    Commit {
        done: IntakeSession,
        before: IntakeSession,
    },
}

impl Routed {
    fn rejected(err: &CoreError, prompt: Prompt) -> Self {
        let reason = match err {
            CoreError::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        Self::Rejected { reason, prompt }
    }
}

impl Bot {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, settings: BotSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                sessions: SessionMap::new(),
                settings,
            }),
        }
    }

    #[must_use]
    pub fn from_config(store: Arc<dyn RecordStore>, config: &PawConfig) -> Self {
        Self::new(store, BotSettings::from(config))
    }

    fn store(&self) -> &dyn RecordStore {
        self.inner.store.as_ref()
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionMap {
        &self.inner.sessions
    }

    #[must_use]
    pub fn settings(&self) -> &BotSettings {
        &self.inner.settings
    }

    #[must_use]
    pub fn policy(&self) -> ModerationPolicy {
        self.store().policy()
    }

    #[must_use]
    pub fn requester(&self, from: &Identity) -> Requester {
        self.policy().requester(from)
    }

    /// Handle one inbound turn.
    ///
    /// A turn that does not fit the live submission stage is answered with
    /// `Reply::Rejected` and leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` for authorization failures, missing records,
    /// storage failures, and malformed turns outside a conversation.
    pub async fn handle(&self, inbound: InboundTurn) -> Result<Reply, CoreError> {
        let InboundTurn { from, turn } = inbound;
        match turn {
            Turn::Command { name } => self.command(&from, &name).await,
            Turn::Action(action) => self.action(&from, action).await,
            turn => self.conversational(&from, turn).await,
        }
    }

    async fn command(&self, from: &Identity, name: &str) -> Result<Reply, CoreError> {
        let command = Command::parse(name)
            .ok_or_else(|| CoreError::Validation(format!("unknown command '{name}'")))?;
        let user_id = from.user_id;

        match command {
            Command::Start | Command::Help => Ok(self.menu(from)),
            Command::Add => {
                let replaced = self
                    .sessions()
                    .begin(user_id, Conversation::Intake(IntakeSession::start(from)));
                tracing::debug!(
                    user_id,
                    replaced = replaced.as_ref().map(Conversation::label),
                    "intake session started"
                );
                Ok(Reply::Prompt {
                    prompt: Prompt::ShareLocation,
                })
            }
            Command::Nearest => {
                let replaced = self.sessions().begin(user_id, Conversation::NearestSearch);
                tracing::debug!(
                    user_id,
                    replaced = replaced.as_ref().map(Conversation::label),
                    "nearest search started"
                );
                Ok(Reply::Prompt {
                    prompt: Prompt::NearestOrigin,
                })
            }
            Command::List => Ok(Reply::Points {
                points: self.list_approved().await?,
            }),
            Command::Mine => Ok(Reply::Mine {
                points: self.list_mine(from).await?,
            }),
            Command::Pending => Ok(Reply::Pending {
                points: self.list_pending(from).await?,
            }),
            Command::Stats => Ok(Reply::Stats {
                stats: self.stats(from).await?,
            }),
            Command::Cancel => {
                let dropped = self.sessions().end(user_id);
                let age_secs = match &dropped {
                    Some(Conversation::Intake(session)) => Some(session.elapsed_secs()),
                    _ => None,
                };
                tracing::debug!(
                    user_id,
                    dropped = dropped.as_ref().map(Conversation::label),
                    age_secs,
                    "conversation cancelled"
                );
                Ok(Reply::Cancelled {
                    had_conversation: dropped.is_some(),
                })
            }
        }
    }

    async fn action(&self, from: &Identity, action: Action) -> Result<Reply, CoreError> {
        let Action { kind, target_id } = action;
        match kind {
            ActionKind::Delete => {
                self.delete(from, &target_id).await?;
                Ok(Reply::Deleted { id: target_id })
            }
            ActionKind::Approve => Ok(Reply::Moderated {
                point: self.approve(from, &target_id).await?,
            }),
            ActionKind::Reject => Ok(Reply::Moderated {
                point: self.reject(from, &target_id).await?,
            }),
        }
    }

    async fn conversational(&self, from: &Identity, turn: Turn) -> Result<Reply, CoreError> {
        let user_id = from.user_id;
        let rules = &self.inner.settings.rules;

        let routed = self
            .sessions()
            .update(user_id, |conversation| match conversation {
                Conversation::NearestSearch => match &turn {
                    Turn::Location { lat, lon } => match Coordinate::new(*lat, *lon) {
                        Ok(origin) => (Routed::NearestOrigin(origin), true),
                        Err(err) => (Routed::rejected(&err, Prompt::NearestOrigin), false),
                    },
                    other => (
                        Routed::Rejected {
                            reason: format!("expected a location turn, got {}", other.kind()),
                            prompt: Prompt::NearestOrigin,
                        },
                        false,
                    ),
                },
                Conversation::Intake(session) => {
                    let before = session.clone();
                    match session.advance(&turn, rules) {
                        Ok(Step::Next(prompt)) => (Routed::Advanced(prompt), false),
                        Ok(Step::Complete) => (
                            Routed::Commit {
                                done: session.clone(),
                                before,
                            },
                            true,
                        ),
                        Err(err) => (Routed::rejected(&err, session.prompt()), false),
                    }
                }
            })
            .unwrap_or(Routed::Idle);

        match routed {
            Routed::Idle => match turn {
                Turn::Location { lat, lon } => {
                    let origin = Coordinate::new(lat, lon)?;
                    self.nearby(origin).await
                }
                _ => Ok(self.menu(from)),
            },
            Routed::NearestOrigin(origin) => self.nearby(origin).await,
            Routed::Rejected { reason, prompt } => {
                tracing::debug!(user_id, %reason, "turn rejected");
                Ok(Reply::Rejected { reason, prompt })
            }
            Routed::Advanced(prompt) => Ok(Reply::Prompt { prompt }),
            Routed::Commit { done, before } => self.commit(user_id, done, before).await,
        }
    }

    /// Persist a completed session. On failure the pre-turn session is put
    /// back so the user can resend the last turn.
    async fn commit(
        &self,
        user_id: UserId,
        done: IntakeSession,
        before: IntakeSession,
    ) -> Result<Reply, CoreError> {
        let age_secs = done.elapsed_secs();
        let inserted = match done.into_draft() {
            Ok(draft) => self.store().insert(draft).await,
            Err(err) => Err(err),
        };

        match inserted {
            Ok(point) => {
                tracing::info!(
                    point_id = %point.id,
                    user_id,
                    status = %point.status,
                    age_secs,
                    "point committed"
                );
                Ok(Reply::Submitted { point })
            }
            Err(err) => {
                tracing::warn!(user_id, error = %err, "commit failed, session kept");
                self.sessions()
                    .restore(user_id, Conversation::Intake(before));
                Err(err)
            }
        }
    }

    fn menu(&self, from: &Identity) -> Reply {
        let policy = self.policy();
        Reply::Menu {
            is_admin: policy.is_admin(from.user_id),
            moderation_enabled: policy.is_enabled(),
        }
    }

    async fn nearby(&self, origin: Coordinate) -> Result<Reply, CoreError> {
        let points = self.nearest(origin, None).await?;
        Ok(Reply::Nearby { origin, points })
    }

    // -----------------------------------------------------------------------
    // Direct operations, shared by the dispatcher and one-shot transports
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store read fails.
    pub async fn list_approved(&self) -> Result<Vec<PointRecord>, CoreError> {
        query::list_approved(self.store()).await
    }

    /// Nearest approved points; `k` defaults to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for an invalid origin.
    pub async fn nearest(
        &self,
        origin: Coordinate,
        k: Option<usize>,
    ) -> Result<Vec<NearbyPoint>, CoreError> {
        let k = k.unwrap_or(self.inner.settings.nearest_limit);
        query::nearest(self.store(), origin, k).await
    }

    /// # Errors
    ///
    /// Returns `CoreError::Storage` if the store read fails.
    pub async fn list_mine(&self, from: &Identity) -> Result<Vec<PointRecord>, CoreError> {
        query::list_mine(self.store(), from.user_id).await
    }

    /// # Errors
    ///
    /// Returns `CoreError::Unauthorized` unless `from` is the administrator.
    pub async fn list_pending(&self, from: &Identity) -> Result<Vec<PointRecord>, CoreError> {
        moderation::list_pending(self.store(), &self.requester(from)).await
    }

    /// # Errors
    ///
    /// See [`moderation::decide`].
    pub async fn approve(&self, from: &Identity, id: &str) -> Result<PointRecord, CoreError> {
        moderation::approve(self.store(), &self.requester(from), id).await
    }

    /// # Errors
    ///
    /// See [`moderation::decide`].
    pub async fn reject(&self, from: &Identity, id: &str) -> Result<PointRecord, CoreError> {
        moderation::reject(self.store(), &self.requester(from), id).await
    }

    /// # Errors
    ///
    /// Returns `CoreError::Unauthorized` unless `from` is the administrator.
    pub async fn stats(&self, from: &Identity) -> Result<ModerationStats, CoreError> {
        moderation::stats(self.store(), &self.requester(from)).await
    }

    /// # Errors
    ///
    /// See [`guard::delete_if_authorized`].
    pub async fn delete(&self, from: &Identity, id: &str) -> Result<PointRecord, CoreError> {
        guard::delete_if_authorized(self.store(), id, &self.requester(from)).await
    }

    /// Owner or admin edit. Text fields obey the intake length limit.
    ///
    /// # Errors
    ///
    /// See [`guard::edit_if_authorized`].
    pub async fn edit(
        &self,
        from: &Identity,
        id: &str,
        update: PointUpdate,
    ) -> Result<PointRecord, CoreError> {
        let rules = &self.inner.settings.rules;
        let update = PointUpdate {
            description: update
                .description
                .map(|text| rules.check_text("description", &text))
                .transpose()?,
            schedule: update
                .schedule
                .map(|text| rules.check_text("schedule", &text))
                .transpose()?,
            photo_ref: update.photo_ref,
            resubmit: false,
        };
        guard::edit_if_authorized(self.store(), id, update, &self.requester(from)).await
    }
}
