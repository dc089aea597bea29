//! Moderation configuration.

use paw_core::policy::ModerationPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModerationConfig {
    /// User id of the single administrator. `0` disables moderation, so every
    /// submission is approved on commit.
    #[serde(default)]
    pub admin_user_id: i64,
}

impl ModerationConfig {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.admin_user_id > 0
    }

    #[must_use]
    pub const fn policy(&self) -> ModerationPolicy {
        ModerationPolicy::from_admin_id(self.admin_user_id)
    }
}
