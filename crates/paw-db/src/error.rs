//! Failures of the libSQL point store.

use paw_core::enums::RecordStatus;
use paw_core::errors::CoreError;
use paw_core::ids::ENTITY_POINT;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Applying an embedded schema file failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A keyed statement matched no row.
    #[error("no matching row")]
    NoResult,

    /// A guarded status update found the row in a status it may not leave.
    #[error("point {id} cannot move from {from} to {to}")]
    Transition {
        id: String,
        from: RecordStatus,
        to: RecordStatus,
    },

    /// A stored row could not be decoded into a point.
    #[error("corrupt point row: {0}")]
    InvalidState(String),

    /// The driver rejected a statement or the connection failed.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl From<DatabaseError> for CoreError {
    /// Keyed lookups turn `NoResult` into `NotFound` before this applies.
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Transition { id, from, to } => Self::InvalidTransition {
                entity_type: ENTITY_POINT.to_string(),
                id,
                from: from.to_string(),
                to: to.to_string(),
            },
            other => Self::Storage(other.to_string()),
        }
    }
}
