//! Schema setup on open.
//!
//! Every statement is `IF NOT EXISTS`, so reopening an existing file is safe.

use crate::PawDb;
use crate::error::DatabaseError;

const POINTS_SCHEMA: &str = include_str!("../migrations/001_points.sql");

impl PawDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(POINTS_SCHEMA)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_points: {e}")))?;
        Ok(())
    }
}
