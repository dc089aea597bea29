use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RecordStatus;
use crate::errors::CoreError;
use crate::geo::Coordinate;
use crate::policy::{Requester, UserId};

/// A committed food-drop point.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PointRecord {
    pub id: String,
    pub owner_id: UserId,
    pub owner_display_name: Option<String>,
    pub coordinate: Coordinate,
    pub description: String,
    pub schedule: String,
    pub photo_ref: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PointRecord {
    /// Whether `requester` may delete or edit this record.
    #[must_use]
    pub fn is_managed_by(&self, requester: &Requester) -> bool {
        requester.id == self.owner_id || requester.is_admin
    }

    /// The tuple handed to map and listing renderers.
    #[must_use]
    pub fn view(&self) -> PointView {
        PointView {
            coordinate: self.coordinate,
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            owner_display_name: self.owner_display_name.clone(),
        }
    }
}

/// A fully collected submission that has not been persisted yet.
///
/// The store assigns `id`, `status`, and timestamps on insert.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PointDraft {
    pub owner_id: UserId,
    pub owner_display_name: Option<String>,
    pub coordinate: Coordinate,
    pub description: String,
    pub schedule: String,
    pub photo_ref: Option<String>,
}

impl PointDraft {
    /// Check the commit invariants: valid coordinate, non-blank text fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on the first violated invariant.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.coordinate.validate()?;
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("description must not be empty".into()));
        }
        if self.schedule.trim().is_empty() {
            return Err(CoreError::Validation("schedule must not be empty".into()));
        }
        Ok(())
    }
}

/// Presentation tuple consumed by the rendering collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PointView {
    pub coordinate: Coordinate,
    pub description: String,
    pub schedule: String,
    pub owner_display_name: Option<String>,
}

/// A record paired with its distance from a query origin.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NearbyPoint {
    pub point: PointRecord,
    pub distance_km: f64,
}
