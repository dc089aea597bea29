//! `RecordStore` implementation over the point repository.

use async_trait::async_trait;

use paw_core::entities::{PointDraft, PointRecord};
use paw_core::enums::RecordStatus;
use paw_core::errors::CoreError;
use paw_core::policy::{ModerationPolicy, UserId};
use paw_core::store::RecordStore;
use paw_core::updates::PointUpdate;

use crate::error::DatabaseError;
use crate::service::PawService;

/// Keyed operations report a missing row as `NotFound` for that id.
fn keyed(id: &str, err: DatabaseError) -> CoreError {
    match err {
        DatabaseError::NoResult => CoreError::point_not_found(id),
        refused @ DatabaseError::Transition { .. } => refused.into(),
        other => {
            tracing::warn!(id, error = %other, "point store failure");
            other.into()
        }
    }
}

fn storage(err: DatabaseError) -> CoreError {
    tracing::warn!(error = %err, "point store failure");
    err.into()
}

#[async_trait]
impl RecordStore for PawService {
    fn policy(&self) -> ModerationPolicy {
        self.moderation_policy()
    }

    async fn insert(&self, draft: PointDraft) -> Result<PointRecord, CoreError> {
        draft.validate()?;
        self.insert_point(&draft).await.map_err(storage)
    }

    async fn get(&self, id: &str) -> Result<PointRecord, CoreError> {
        self.get_point(id).await.map_err(|e| keyed(id, e))
    }

    async fn list_approved(&self) -> Result<Vec<PointRecord>, CoreError> {
        self.list_points_by_status(RecordStatus::Approved)
            .await
            .map_err(storage)
    }

    async fn list_pending(&self) -> Result<Vec<PointRecord>, CoreError> {
        self.list_points_by_status(RecordStatus::Pending)
            .await
            .map_err(storage)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<PointRecord>, CoreError> {
        self.list_points_by_owner(owner).await.map_err(storage)
    }

    async fn update_status(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> Result<PointRecord, CoreError> {
        self.update_point_status(id, status)
            .await
            .map_err(|e| keyed(id, e))
    }

    async fn update_fields(
        &self,
        id: &str,
        update: PointUpdate,
    ) -> Result<PointRecord, CoreError> {
        update.validate()?;
        self.update_point(id, &update)
            .await
            .map_err(|e| keyed(id, e))
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let removed = self.delete_point(id).await.map_err(storage)?;
        tracing::debug!(id, removed, "point delete");
        Ok(())
    }

    async fn count_by_status(&self, status: RecordStatus) -> Result<u64, CoreError> {
        self.count_points_by_status(status).await.map_err(storage)
    }
}
