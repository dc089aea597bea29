//! Partial update for owner/admin edits of a committed point.
//!
//! Only `Some` fields generate SET clauses in the store's dynamic UPDATE.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PointUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_ref: Option<String>,
    /// Send an `Approved` point back to `Pending` in the same statement.
    /// Set by the ownership guard, never read from the wire.
    #[serde(skip)]
    pub resubmit: bool,
}

impl PointUpdate {
    /// True when no field would change. `resubmit` alone is not an edit.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.schedule.is_none() && self.photo_ref.is_none()
    }

    /// Required text fields must stay non-blank after an edit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a provided field is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in [
            ("description", &self.description),
            ("schedule", &self.schedule),
            ("photo_ref", &self.photo_ref),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CoreError::Validation(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

pub struct PointUpdateBuilder(PointUpdate);

impl PointUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PointUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, val: impl Into<String>) -> Self {
        self.0.description = Some(val.into());
        self
    }

    #[must_use]
    pub fn schedule(mut self, val: impl Into<String>) -> Self {
        self.0.schedule = Some(val.into());
        self
    }

    #[must_use]
    pub fn photo_ref(mut self, val: impl Into<String>) -> Self {
        self.0.photo_ref = Some(val.into());
        self
    }

    #[must_use]
    pub fn build(self) -> PointUpdate {
        self.0
    }
}

impl Default for PointUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
