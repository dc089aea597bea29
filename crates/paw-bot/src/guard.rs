//! Ownership guard for destructive and editing requests.

use paw_core::entities::PointRecord;
use paw_core::errors::CoreError;
use paw_core::policy::Requester;
use paw_core::store::RecordStore;
use paw_core::updates::PointUpdate;

/// True iff `requester` owns `record` or is the administrator.
#[must_use]
pub fn authorize_delete(record: &PointRecord, requester: &Requester) -> bool {
    record.is_managed_by(requester)
}

async fn fetch_managed(
    store: &dyn RecordStore,
    id: &str,
    requester: &Requester,
    action: &str,
) -> Result<PointRecord, CoreError> {
    let record = store.get(id).await?;
    if !authorize_delete(&record, requester) {
        tracing::warn!(
            user_id = requester.id,
            point_id = id,
            owner_id = record.owner_id,
            action,
            "ownership check failed"
        );
        return Err(CoreError::unauthorized(requester.id, format!("{action} {id}")));
    }
    Ok(record)
}

/// Fetch, guard, then delete.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the point does not exist and
/// `CoreError::Unauthorized` (record untouched) for anyone but the owner or
/// the administrator.
pub async fn delete_if_authorized(
    store: &dyn RecordStore,
    id: &str,
    requester: &Requester,
) -> Result<PointRecord, CoreError> {
    let record = fetch_managed(store, id, requester, "delete").await?;
    store.delete(id).await?;
    tracing::info!(
        point_id = id,
        user_id = requester.id,
        by_admin = requester.is_admin && requester.id != record.owner_id,
        "point deleted"
    );
    Ok(record)
}

/// Fetch, guard, then apply `update`.
///
/// With moderation on, an edit by anyone but the administrator sends an
/// approved point back to review in the same store call.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an empty or blank update, plus the
/// errors of [`delete_if_authorized`].
pub async fn edit_if_authorized(
    store: &dyn RecordStore,
    id: &str,
    mut update: PointUpdate,
    requester: &Requester,
) -> Result<PointRecord, CoreError> {
    if update.is_empty() {
        return Err(CoreError::Validation("nothing to change".into()));
    }
    update.validate()?;
    let before = fetch_managed(store, id, requester, "edit").await?;
    update.resubmit = store.policy().is_enabled() && !requester.is_admin;
    let updated = store.update_fields(id, update).await?;
    tracing::info!(
        point_id = id,
        user_id = requester.id,
        from = %before.status,
        to = %updated.status,
        "point edited"
    );
    Ok(updated)
}
