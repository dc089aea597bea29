//! Query Service over the approved set.

use paw_core::entities::{NearbyPoint, PointRecord};
use paw_core::errors::CoreError;
use paw_core::geo::Coordinate;
use paw_core::policy::UserId;
use paw_core::store::RecordStore;

/// Every approved point, insertion order.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the store read fails.
pub async fn list_approved(store: &dyn RecordStore) -> Result<Vec<PointRecord>, CoreError> {
    let points = store.list_approved().await?;
    tracing::debug!(count = points.len(), "listed approved points");
    Ok(points)
}

/// The `k` approved points closest to `origin`, closest first.
///
/// # Errors
///
/// Returns `CoreError::Validation` for an invalid origin and
/// `CoreError::Storage` if the store read fails.
pub async fn nearest(
    store: &dyn RecordStore,
    origin: Coordinate,
    k: usize,
) -> Result<Vec<NearbyPoint>, CoreError> {
    origin.validate()?;
    let approved = store.list_approved().await?;
    let scanned = approved.len();
    let nearby = rank_by_distance(approved, origin, k);
    tracing::debug!(scanned, returned = nearby.len(), k, "nearest query");
    Ok(nearby)
}

/// Distance to every point, stable ascending sort, first `k`.
///
/// Ties keep the input order.
#[must_use]
pub fn rank_by_distance(
    points: Vec<PointRecord>,
    origin: Coordinate,
    k: usize,
) -> Vec<NearbyPoint> {
    let mut ranked: Vec<NearbyPoint> = points
        .into_iter()
        .map(|point| NearbyPoint {
            distance_km: origin.distance_to(&point.coordinate),
            point,
        })
        .collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked.truncate(k);
    ranked
}

/// Every point owned by `owner`, any status.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the store read fails.
pub async fn list_mine(
    store: &dyn RecordStore,
    owner: UserId,
) -> Result<Vec<PointRecord>, CoreError> {
    let points = store.list_by_owner(owner).await?;
    tracing::debug!(user_id = owner, count = points.len(), "listed own points");
    Ok(points)
}
