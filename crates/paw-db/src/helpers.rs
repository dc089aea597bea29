//! Column decoders for `points` rows.
//!
//! libSQL hands back loosely typed columns; these turn them into the core's
//! types and report bad stored data as `DatabaseError::InvalidState`.

use chrono::{DateTime, NaiveDateTime, Utc};

use paw_core::enums::RecordStatus;
use paw_core::geo::Coordinate;

use crate::error::DatabaseError;

/// Decode a stored timestamp.
///
/// Rows written by the repository use RFC 3339; rows written by hand with
/// `datetime('now')` use `YYYY-MM-DD HH:MM:SS` in UTC. Both are accepted.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for anything else.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc()))
        .map_err(|_| DatabaseError::InvalidState(format!("unreadable timestamp '{raw}'")))
}

/// Decode the `status` column.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for a value outside the three statuses.
pub fn parse_status(raw: &str) -> Result<RecordStatus, DatabaseError> {
    RecordStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == raw)
    .ok_or_else(|| DatabaseError::InvalidState(format!("unknown point status '{raw}'")))
}

/// Read an optional TEXT column; SQL NULL and `''` both mean absent.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn opt_text(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?.filter(|s| !s.is_empty()))
}

/// Read the `(latitude, longitude)` column pair starting at `lat_idx`.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the stored pair is out of range.
pub fn read_coordinate(row: &libsql::Row, lat_idx: i32) -> Result<Coordinate, DatabaseError> {
    let latitude = row.get::<f64>(lat_idx)?;
    let longitude = row.get::<f64>(lat_idx + 1)?;
    Coordinate::new(latitude, longitude)
        .map_err(|e| DatabaseError::InvalidState(format!("stored coordinate: {e}")))
}
