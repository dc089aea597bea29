//! Reply values emitted to the outbound response sink.
//!
//! Replies carry data only. Turning them into chat messages, buttons, maps,
//! or images is the transport's job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{NearbyPoint, PointRecord};
use crate::geo::Coordinate;

/// What the user should send next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Prompt {
    /// Share the location of the food-drop point.
    ShareLocation,
    /// Describe the point (e.g. "Park entrance, by the fountain").
    Description,
    /// When food is left there (e.g. "daily 18:00").
    Schedule,
    /// Send a photo, or a skip word.
    Photo,
    /// Share your current location to search nearby points.
    NearestOrigin,
}

/// Record counts per moderation status, for the admin panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModerationStats {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// Result value of handling one inbound turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Main menu; `is_admin` tells the transport to offer the admin entry.
    Menu {
        is_admin: bool,
        moderation_enabled: bool,
    },
    /// The conversation advanced and now waits for `prompt`.
    Prompt { prompt: Prompt },
    /// The turn did not fit the current stage; nothing advanced.
    Rejected { reason: String, prompt: Prompt },
    /// A submission was committed. `point.status` tells whether it awaits review.
    Submitted { point: PointRecord },
    /// The approved set.
    Points { points: Vec<PointRecord> },
    /// Approved points nearest to `origin`, closest first.
    Nearby {
        origin: Coordinate,
        points: Vec<NearbyPoint>,
    },
    /// The caller's own points, every status.
    Mine { points: Vec<PointRecord> },
    /// Points awaiting review (admin only).
    Pending { points: Vec<PointRecord> },
    /// Moderation counts (admin only).
    Stats { stats: ModerationStats },
    /// A moderation decision was applied (or was already in place).
    Moderated { point: PointRecord },
    /// An owner or admin edit was applied.
    Updated { point: PointRecord },
    /// The point is gone.
    Deleted { id: String },
    /// The caller's live conversation, if any, was dropped.
    Cancelled { had_conversation: bool },
}
