//! The Record Store seam.
//!
//! The bot talks to persistence only through this trait. `paw-db` provides the
//! libSQL implementation; the trait keeps the core free of query syntax.

use async_trait::async_trait;

use crate::entities::{PointDraft, PointRecord};
use crate::enums::RecordStatus;
use crate::errors::CoreError;
use crate::policy::{ModerationPolicy, UserId};
use crate::updates::PointUpdate;

/// System of record for committed points.
///
/// Every method is atomic per record. Listings are in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The policy used to pick the initial status on insert.
    fn policy(&self) -> ModerationPolicy;

    /// Persist a finished draft. Assigns `id`, timestamps, and the initial status.
    async fn insert(&self, draft: PointDraft) -> Result<PointRecord, CoreError>;

    /// Fetch one record; `CoreError::NotFound` if absent.
    async fn get(&self, id: &str) -> Result<PointRecord, CoreError>;

    /// Records with status `Approved`. The filter is applied by the store.
    async fn list_approved(&self) -> Result<Vec<PointRecord>, CoreError>;

    /// Records with status `Pending`.
    async fn list_pending(&self) -> Result<Vec<PointRecord>, CoreError>;

    /// Every record owned by `owner`, any status.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<PointRecord>, CoreError>;

    /// Set `status`, checked against the stored status in the same step.
    ///
    /// A no-op if already there. `CoreError::NotFound` if absent and
    /// `CoreError::InvalidTransition` if the current status may not move to
    /// `status`.
    async fn update_status(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> Result<PointRecord, CoreError>;

    /// Apply the `Some` fields of `update`; `CoreError::NotFound` if absent.
    async fn update_fields(&self, id: &str, update: PointUpdate)
    -> Result<PointRecord, CoreError>;

    /// Remove a record. Deleting an absent id succeeds.
    async fn delete(&self, id: &str) -> Result<(), CoreError>;

    /// Number of records currently in `status`.
    async fn count_by_status(&self, status: RecordStatus) -> Result<u64, CoreError>;
}
