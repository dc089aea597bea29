//! Status enums, intake stages, and turn/action kinds for pawpoints.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Enums with state machines provide `allowed_next_states()` to enforce valid
//! transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RecordStatus
// ---------------------------------------------------------------------------

/// Moderation status of a committed point record.
///
/// ```text
/// pending → approved
///         → rejected
/// ```
///
/// Only `Approved` records are visible to generic queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Pending,
    Approved,
    Rejected,
}

impl RecordStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether generic (non-owner) queries may see a record in this status.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IntakeStage
// ---------------------------------------------------------------------------

/// Stage of a per-user submission session.
///
/// ```text
/// awaiting_location → awaiting_description → awaiting_schedule → awaiting_photo → complete
///                                                              → complete (photo step off)
/// ```
///
/// "Idle" has no variant: a user with no session is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStage {
    AwaitingLocation,
    AwaitingDescription,
    AwaitingSchedule,
    AwaitingPhoto,
    Complete,
}

impl IntakeStage {
    /// The turn kind that advances this stage, or `None` once complete.
    #[must_use]
    pub const fn expected_turn(self) -> Option<TurnKind> {
        match self {
            Self::AwaitingLocation => Some(TurnKind::Location),
            Self::AwaitingDescription | Self::AwaitingSchedule => Some(TurnKind::Text),
            Self::AwaitingPhoto => Some(TurnKind::Image),
            Self::Complete => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingLocation => "awaiting_location",
            Self::AwaitingDescription => "awaiting_description",
            Self::AwaitingSchedule => "awaiting_schedule",
            Self::AwaitingPhoto => "awaiting_photo",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TurnKind
// ---------------------------------------------------------------------------

/// Discriminant of an inbound turn, used in re-prompt messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Location,
    Text,
    Image,
    Command,
    Action,
}

impl TurnKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Text => "text",
            Self::Image => "image",
            Self::Command => "command",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionKind
// ---------------------------------------------------------------------------

/// Kind of a button action targeting a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Delete,
    Approve,
    Reject,
}

impl ActionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
