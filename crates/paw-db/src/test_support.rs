//! Shared test utilities for paw-db unit tests.

use paw_core::entities::PointDraft;
use paw_core::geo::Coordinate;
use paw_core::policy::{ModerationPolicy, UserId};

use crate::PawDb;
use crate::service::PawService;

/// Admin id used by moderated test services.
pub const TEST_ADMIN: UserId = 1000;

/// In-memory service with moderation disabled.
pub async fn test_service() -> PawService {
    test_service_with_policy(ModerationPolicy::disabled()).await
}

/// In-memory service with `TEST_ADMIN` configured (moderation on).
pub async fn moderated_service() -> PawService {
    test_service_with_policy(ModerationPolicy::with_admin(TEST_ADMIN)).await
}

pub async fn test_service_with_policy(policy: ModerationPolicy) -> PawService {
    let db = PawDb::open_local(":memory:").await.unwrap();
    PawService::from_db(db, policy)
}

/// A valid draft at the given position.
pub fn draft_at(owner_id: UserId, latitude: f64, longitude: f64, description: &str) -> PointDraft {
    PointDraft {
        owner_id,
        owner_display_name: Some(format!("user{owner_id}")),
        coordinate: Coordinate::new(latitude, longitude).unwrap(),
        description: description.to_string(),
        schedule: "daily 18:00".to_string(),
        photo_ref: None,
    }
}
