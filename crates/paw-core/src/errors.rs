//! Cross-cutting error types for pawpoints.
//!
//! `CoreError` is the error surfaced by every core operation. Storage-specific
//! errors (`DatabaseError` in `paw-db`) are converted into `CoreError::Storage`
//! at the `RecordStore` boundary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ENTITY_POINT;
use crate::policy::UserId;

/// Errors that can be raised by any pawpoints crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A turn or request carried a malformed, empty, or out-of-range value.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller lacks the identity required for the operation.
    #[error("Not authorized: user {user_id} cannot {action}")]
    Unauthorized { user_id: UserId, action: String },

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// The underlying persistence layer failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// `NotFound` for a point record.
    #[must_use]
    pub fn point_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: ENTITY_POINT.to_string(),
            id: id.into(),
        }
    }

    /// `Unauthorized` for the given user and action label.
    #[must_use]
    pub fn unauthorized(user_id: UserId, action: impl Into<String>) -> Self {
        Self::Unauthorized {
            user_id,
            action: action.into(),
        }
    }

    /// Where this error sits in the error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidTransition { .. } => ErrorKind::Validation,
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// Coarse error category reported to transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    Storage,
}

/// Serializable error body written to the response sink.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub message: String,
}

impl From<&CoreError> for ErrorBody {
    fn from(err: &CoreError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            CoreError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            CoreError::unauthorized(7, "approve points").kind(),
            ErrorKind::Authorization
        );
        assert_eq!(
            CoreError::point_not_found("pnt-00000000").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::Storage("disk full".into()).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn error_body_carries_message() {
        let err = CoreError::point_not_found("pnt-deadbeef");
        let body = ErrorBody::from(&err);
        assert_eq!(body.error, ErrorKind::NotFound);
        assert_eq!(body.message, "Entity not found: point pnt-deadbeef");
    }
}
