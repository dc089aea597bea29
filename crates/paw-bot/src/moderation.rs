//! Moderation Workflow: pending review for the single administrator.
//!
//! Every operation checks the requester before touching the store.

use paw_core::entities::PointRecord;
use paw_core::enums::RecordStatus;
use paw_core::errors::CoreError;
use paw_core::ids::ENTITY_POINT;
use paw_core::policy::Requester;
use paw_core::responses::ModerationStats;
use paw_core::store::RecordStore;

fn require_admin(requester: &Requester, action: &str) -> Result<(), CoreError> {
    if requester.is_admin {
        Ok(())
    } else {
        tracing::warn!(user_id = requester.id, action, "moderation denied");
        Err(CoreError::unauthorized(requester.id, action))
    }
}

/// Points awaiting review.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` for non-admin callers.
pub async fn list_pending(
    store: &dyn RecordStore,
    requester: &Requester,
) -> Result<Vec<PointRecord>, CoreError> {
    require_admin(requester, "list pending points")?;
    let points = store.list_pending().await?;
    tracing::debug!(count = points.len(), "listed pending points");
    Ok(points)
}

/// Publish a pending point.
///
/// # Errors
///
/// See [`decide`].
pub async fn approve(
    store: &dyn RecordStore,
    requester: &Requester,
    id: &str,
) -> Result<PointRecord, CoreError> {
    decide(store, requester, id, RecordStatus::Approved).await
}

/// Reject a pending point. Rejection is terminal.
///
/// # Errors
///
/// See [`decide`].
pub async fn reject(
    store: &dyn RecordStore,
    requester: &Requester,
    id: &str,
) -> Result<PointRecord, CoreError> {
    decide(store, requester, id, RecordStatus::Rejected).await
}

/// Move a point out of `Pending`. Repeating the decision already in place
/// returns the record unchanged.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` for non-admin callers,
/// `CoreError::NotFound` if the point is gone, and
/// `CoreError::InvalidTransition` when reversing a terminal decision.
pub async fn decide(
    store: &dyn RecordStore,
    requester: &Requester,
    id: &str,
    target: RecordStatus,
) -> Result<PointRecord, CoreError> {
    require_admin(requester, &format!("mark points {target}"))?;

    let current = store.get(id).await?;
    if current.status == target {
        tracing::debug!(point_id = id, status = %target, "moderation no-op");
        return Ok(current);
    }
    if !current.status.can_transition_to(target) {
        return Err(CoreError::InvalidTransition {
            entity_type: ENTITY_POINT.to_string(),
            id: id.to_string(),
            from: current.status.to_string(),
            to: target.to_string(),
        });
    }

    let updated = store.update_status(id, target).await?;
    tracing::info!(
        point_id = id,
        from = %current.status,
        to = %updated.status,
        admin_id = requester.id,
        "moderation decision"
    );
    Ok(updated)
}

/// Counts per status for the admin panel.
///
/// # Errors
///
/// Returns `CoreError::Unauthorized` for non-admin callers.
pub async fn stats(
    store: &dyn RecordStore,
    requester: &Requester,
) -> Result<ModerationStats, CoreError> {
    require_admin(requester, "view moderation stats")?;
    Ok(ModerationStats {
        pending: store.count_by_status(RecordStatus::Pending).await?,
        approved: store.count_by_status(RecordStatus::Approved).await?,
        rejected: store.count_by_status(RecordStatus::Rejected).await?,
    })
}
