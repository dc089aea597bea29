//! Point repository: insert, keyed lookup, filtered listings, status and field
//! updates, deletion, and counts.

use chrono::Utc;

use paw_core::entities::{PointDraft, PointRecord};
use paw_core::enums::RecordStatus;
use paw_core::ids::PREFIX_POINT;
use paw_core::policy::UserId;
use paw_core::updates::PointUpdate;

use crate::error::DatabaseError;
use crate::helpers::{opt_text, parse_status, parse_timestamp, read_coordinate};
use crate::service::PawService;

const POINT_COLUMNS: &str = "id, owner_id, owner_display_name, latitude, longitude, description, \
     schedule, photo_ref, status, created_at, updated_at";

fn row_to_point(row: &libsql::Row) -> Result<PointRecord, DatabaseError> {
    Ok(PointRecord {
        id: row.get::<String>(0)?,
        owner_id: row.get::<i64>(1)?,
        owner_display_name: opt_text(row, 2)?,
        coordinate: read_coordinate(row, 3)?,
        description: row.get::<String>(5)?,
        schedule: row.get::<String>(6)?,
        photo_ref: opt_text(row, 7)?,
        status: parse_status(&row.get::<String>(8)?)?,
        created_at: parse_timestamp(&row.get::<String>(9)?)?,
        updated_at: parse_timestamp(&row.get::<String>(10)?)?,
    })
}

async fn collect_points(mut rows: libsql::Rows) -> Result<Vec<PointRecord>, DatabaseError> {
    let mut points = Vec::new();
    while let Some(row) = rows.next().await? {
        points.push(row_to_point(&row)?);
    }
    Ok(points)
}

impl PawService {
    /// Insert a finished draft with the policy's initial status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if ID generation or the INSERT fails.
    pub async fn insert_point(&self, draft: &PointDraft) -> Result<PointRecord, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_POINT).await?;
        let status = self.moderation_policy().initial_status();

        self.db()
            .conn()
            .execute(
                "INSERT INTO points (id, owner_id, owner_display_name, latitude, longitude,
                                     description, schedule, photo_ref, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    id.as_str(),
                    draft.owner_id,
                    draft.owner_display_name.as_deref(),
                    draft.coordinate.latitude,
                    draft.coordinate.longitude,
                    draft.description.as_str(),
                    draft.schedule.as_str(),
                    draft.photo_ref.as_deref(),
                    status.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(PointRecord {
            id,
            owner_id: draft.owner_id,
            owner_display_name: draft.owner_display_name.clone(),
            coordinate: draft.coordinate,
            description: draft.description.clone(),
            schedule: draft.schedule.clone(),
            photo_ref: draft.photo_ref.clone(),
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a point by ID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the point does not exist.
    pub async fn get_point(&self, id: &str) -> Result<PointRecord, DatabaseError> {
        let sql = format!("SELECT {POINT_COLUMNS} FROM points WHERE id = ?1");
        let mut rows = self.db().conn().query(&sql, [id]).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_point(&row)
    }

    /// List points in one status, insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_points_by_status(
        &self,
        status: RecordStatus,
    ) -> Result<Vec<PointRecord>, DatabaseError> {
        let sql = format!("SELECT {POINT_COLUMNS} FROM points WHERE status = ?1 ORDER BY rowid ASC");
        let rows = self.db().conn().query(&sql, [status.as_str()]).await?;
        collect_points(rows).await
    }

    /// List every point owned by `owner`, insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_points_by_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<PointRecord>, DatabaseError> {
        let sql =
            format!("SELECT {POINT_COLUMNS} FROM points WHERE owner_id = ?1 ORDER BY rowid ASC");
        let rows = self.db().conn().query(&sql, libsql::params![owner]).await?;
        collect_points(rows).await
    }

    /// Set a point's status in one statement.
    ///
    /// The row only matches while its current status is `status` itself or
    /// one that may move to it, so two racing decisions cannot both land.
    /// `updated_at` only moves when the status actually changes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the point does not exist and
    /// `DatabaseError::Transition` if its status may not move to `status`.
    pub async fn update_point_status(
        &self,
        id: &str,
        status: RecordStatus,
    ) -> Result<PointRecord, DatabaseError> {
        let sources: Vec<RecordStatus> = RecordStatus::ALL
            .into_iter()
            .filter(|from| *from == status || from.can_transition_to(status))
            .collect();
        let placeholders: Vec<String> = (0..sources.len()).map(|i| format!("?{}", i + 4)).collect();

        let mut params = vec![
            libsql::Value::Text(status.as_str().to_string()),
            libsql::Value::Text(Utc::now().to_rfc3339()),
            libsql::Value::Text(id.to_string()),
        ];
        params.extend(
            sources
                .iter()
                .map(|from| libsql::Value::Text(from.as_str().to_string())),
        );

        let sql = format!(
            "UPDATE points
             SET updated_at = CASE WHEN status = ?1 THEN updated_at ELSE ?2 END,
                 status = ?1
             WHERE id = ?3 AND status IN ({})
             RETURNING {POINT_COLUMNS}",
            placeholders.join(", ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        if let Some(row) = rows.next().await? {
            return row_to_point(&row);
        }

        let current = self.get_point(id).await?;
        Err(DatabaseError::Transition {
            id: id.to_string(),
            from: current.status,
            to: status,
        })
    }

    /// Apply the `Some` fields of `update` in one statement.
    ///
    /// An empty update returns the current row unchanged. With `resubmit`
    /// set, an `Approved` row drops back to `Pending`; other statuses stay.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the point does not exist.
    pub async fn update_point(
        &self,
        id: &str,
        update: &PointUpdate,
    ) -> Result<PointRecord, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1;

        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(libsql::Value::Text(description.clone()));
            idx += 1;
        }
        if let Some(ref schedule) = update.schedule {
            sets.push(format!("schedule = ?{idx}"));
            params.push(libsql::Value::Text(schedule.clone()));
            idx += 1;
        }
        if let Some(ref photo_ref) = update.photo_ref {
            sets.push(format!("photo_ref = ?{idx}"));
            params.push(libsql::Value::Text(photo_ref.clone()));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_point(id).await;
        }

        if update.resubmit {
            sets.push(format!(
                "status = CASE WHEN status = '{}' THEN '{}' ELSE status END",
                RecordStatus::Approved.as_str(),
                RecordStatus::Pending.as_str()
            ));
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(libsql::Value::Text(Utc::now().to_rfc3339()));
        idx += 1;

        params.push(libsql::Value::Text(id.to_string()));
        let sql = format!(
            "UPDATE points SET {} WHERE id = ?{idx} RETURNING {POINT_COLUMNS}",
            sets.join(", ")
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_point(&row)
    }

    /// Delete a point. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn delete_point(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM points WHERE id = ?1", [id])
            .await?;
        Ok(affected > 0)
    }

    /// Count points in one status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the count is negative.
    pub async fn count_points_by_status(&self, status: RecordStatus) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM points WHERE status = ?1",
                [status.as_str()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count)
            .map_err(|_| DatabaseError::InvalidState(format!("negative count {count}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{draft_at, moderated_service, test_service};
    use paw_core::updates::PointUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn insert_point_roundtrip() {
        let svc = test_service().await;
        let inserted = svc
            .insert_point(&draft_at(1, 38.487, 27.132, "Park entrance"))
            .await
            .unwrap();

        assert!(inserted.id.starts_with("pnt-"));
        assert_eq!(inserted.status, RecordStatus::Approved);

        let fetched = svc.get_point(&inserted.id).await.unwrap();
        assert_eq!(fetched.id, inserted.id);
        assert_eq!(fetched.owner_id, 1);
        assert_eq!(fetched.owner_display_name.as_deref(), Some("user1"));
        assert_eq!(fetched.coordinate, inserted.coordinate);
        assert_eq!(fetched.description, "Park entrance");
        assert_eq!(fetched.schedule, "daily 18:00");
        assert_eq!(fetched.photo_ref, None);
        assert_eq!(fetched.created_at, inserted.created_at);
    }

    #[tokio::test]
    async fn moderated_insert_is_pending() {
        let svc = moderated_service().await;
        let inserted = svc
            .insert_point(&draft_at(1, 38.487, 27.132, "Park entrance"))
            .await
            .unwrap();
        assert_eq!(inserted.status, RecordStatus::Pending);
        assert_eq!(
            svc.get_point(&inserted.id).await.unwrap().status,
            RecordStatus::Pending
        );
    }

    #[tokio::test]
    async fn get_missing_point_is_no_result() {
        let svc = test_service().await;
        let result = svc.get_point("pnt-00000000").await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn listings_filter_by_status_in_insertion_order() {
        let svc = moderated_service().await;
        let a = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();
        let b = svc.insert_point(&draft_at(2, 2.0, 2.0, "b")).await.unwrap();
        let c = svc.insert_point(&draft_at(1, 3.0, 3.0, "c")).await.unwrap();

        svc.update_point_status(&c.id, RecordStatus::Approved)
            .await
            .unwrap();
        svc.update_point_status(&a.id, RecordStatus::Approved)
            .await
            .unwrap();

        let approved: Vec<String> = svc
            .list_points_by_status(RecordStatus::Approved)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(approved, vec![a.id.clone(), c.id.clone()]);

        let pending = svc
            .list_points_by_status(RecordStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, b.id);

        let mine = svc.list_points_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn repeated_status_update_keeps_updated_at() {
        let svc = moderated_service().await;
        let point = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();

        let first = svc
            .update_point_status(&point.id, RecordStatus::Approved)
            .await
            .unwrap();
        let second = svc
            .update_point_status(&point.id, RecordStatus::Approved)
            .await
            .unwrap();

        assert_eq!(second.status, RecordStatus::Approved);
        assert_eq!(second.updated_at, first.updated_at);
    }

    #[tokio::test]
    async fn status_update_on_missing_point_is_no_result() {
        let svc = test_service().await;
        let result = svc
            .update_point_status("pnt-00000000", RecordStatus::Approved)
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn terminal_status_is_not_overwritten() {
        let svc = moderated_service().await;
        let point = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();
        let approved = svc
            .update_point_status(&point.id, RecordStatus::Approved)
            .await
            .unwrap();

        let result = svc
            .update_point_status(&point.id, RecordStatus::Rejected)
            .await;
        assert!(matches!(
            result,
            Err(DatabaseError::Transition {
                from: RecordStatus::Approved,
                to: RecordStatus::Rejected,
                ..
            })
        ));

        let stored = svc.get_point(&point.id).await.unwrap();
        assert_eq!(stored.status, RecordStatus::Approved);
        assert_eq!(stored.updated_at, approved.updated_at);
    }

    #[tokio::test]
    async fn update_point_partial() {
        let svc = test_service().await;
        let point = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();

        let update = PointUpdateBuilder::new()
            .schedule("weekends")
            .photo_ref("file-9")
            .build();
        let updated = svc.update_point(&point.id, &update).await.unwrap();

        assert_eq!(updated.description, "a");
        assert_eq!(updated.schedule, "weekends");
        assert_eq!(updated.photo_ref.as_deref(), Some("file-9"));
        assert_eq!(updated.created_at, point.created_at);
    }

    #[tokio::test]
    async fn resubmitted_edit_only_reopens_approved_points() {
        let svc = moderated_service().await;
        let approved = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();
        let rejected = svc.insert_point(&draft_at(1, 2.0, 2.0, "b")).await.unwrap();
        svc.update_point_status(&approved.id, RecordStatus::Approved)
            .await
            .unwrap();
        svc.update_point_status(&rejected.id, RecordStatus::Rejected)
            .await
            .unwrap();

        let update = PointUpdate {
            resubmit: true,
            ..PointUpdateBuilder::new().description("moved").build()
        };
        let reopened = svc.update_point(&approved.id, &update).await.unwrap();
        assert_eq!(reopened.status, RecordStatus::Pending);
        assert_eq!(reopened.description, "moved");

        let still_rejected = svc.update_point(&rejected.id, &update).await.unwrap();
        assert_eq!(still_rejected.status, RecordStatus::Rejected);
    }

    #[tokio::test]
    async fn delete_point_is_idempotent() {
        let svc = test_service().await;
        let point = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();

        assert!(svc.delete_point(&point.id).await.unwrap());
        assert!(!svc.delete_point(&point.id).await.unwrap());
        assert!(matches!(
            svc.get_point(&point.id).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn counts_by_status() {
        let svc = moderated_service().await;
        let a = svc.insert_point(&draft_at(1, 1.0, 1.0, "a")).await.unwrap();
        svc.insert_point(&draft_at(1, 2.0, 2.0, "b")).await.unwrap();
        svc.update_point_status(&a.id, RecordStatus::Rejected)
            .await
            .unwrap();

        assert_eq!(
            svc.count_points_by_status(RecordStatus::Pending)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            svc.count_points_by_status(RecordStatus::Rejected)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            svc.count_points_by_status(RecordStatus::Approved)
                .await
                .unwrap(),
            0
        );
    }
}
