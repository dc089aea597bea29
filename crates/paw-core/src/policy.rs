//! Caller identity and the deployment-wide moderation policy.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::RecordStatus;

/// Stable identifier of a chat user.
pub type UserId = i64;

/// Identity carried by every inbound turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    /// Presentation label (e.g. a username). `None` = anonymous.
    #[serde(default, deserialize_with = "non_blank_name")]
    #[schemars(with = "Option<String>")]
    pub display_name: Option<String>,
}

fn non_blank_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|name| !name.trim().is_empty()))
}

impl Identity {
    #[must_use]
    pub fn new(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.filter(|name| !name.trim().is_empty()),
        }
    }
}

/// A resolved caller: identity plus whether it is the configured administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: UserId,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

/// Whether new submissions need administrator approval.
///
/// Moderation is opt-in at deployment time: configuring an administrator
/// turns it on for every submission, regardless of who submits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModerationPolicy {
    admin_user_id: Option<UserId>,
}

impl ModerationPolicy {
    /// No administrator; every submission is approved on commit.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            admin_user_id: None,
        }
    }

    /// Moderation enabled with `admin` as the single administrator.
    #[must_use]
    pub const fn with_admin(admin: UserId) -> Self {
        Self {
            admin_user_id: Some(admin),
        }
    }

    /// Build from a raw configured id, where `0` (or any non-positive value)
    /// means moderation is disabled.
    #[must_use]
    pub const fn from_admin_id(raw: i64) -> Self {
        if raw > 0 {
            Self::with_admin(raw)
        } else {
            Self::disabled()
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.admin_user_id.is_some()
    }

    #[must_use]
    pub const fn admin_user_id(&self) -> Option<UserId> {
        self.admin_user_id
    }

    /// Equality check against the configured administrator.
    #[must_use]
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_user_id == Some(user_id)
    }

    /// Status assigned to a freshly committed record.
    #[must_use]
    pub const fn initial_status(&self) -> RecordStatus {
        if self.is_enabled() {
            RecordStatus::Pending
        } else {
            RecordStatus::Approved
        }
    }

    /// Resolve a turn identity into a requester.
    #[must_use]
    pub fn requester(&self, identity: &Identity) -> Requester {
        Requester {
            id: identity.user_id,
            display_name: identity.display_name.clone(),
            is_admin: self.is_admin(identity.user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_admin_disables_moderation() {
        let policy = ModerationPolicy::from_admin_id(0);
        assert!(!policy.is_enabled());
        assert_eq!(policy.initial_status(), RecordStatus::Approved);
        assert!(!policy.is_admin(0));
    }

    #[test]
    fn configured_admin_enables_moderation_for_everyone() {
        let policy = ModerationPolicy::from_admin_id(42);
        assert!(policy.is_enabled());
        assert_eq!(policy.initial_status(), RecordStatus::Pending);
        assert!(policy.is_admin(42));
        assert!(!policy.is_admin(7));
    }

    #[test]
    fn requester_resolution() {
        let policy = ModerationPolicy::with_admin(42);
        let admin = policy.requester(&Identity::new(42, Some("admin".into())));
        let member = policy.requester(&Identity::new(7, None));
        assert!(admin.is_admin);
        assert!(!member.is_admin);
        assert_eq!(member.id, 7);
    }

    #[test]
    fn blank_display_name_is_anonymous() {
        assert_eq!(Identity::new(1, Some("  ".into())).display_name, None);
    }

    #[test]
    fn blank_display_name_on_the_wire_is_anonymous() {
        let blank: Identity =
            serde_json::from_str(r#"{"user_id": 1, "display_name": "  "}"#).unwrap();
        assert_eq!(blank.display_name, None);

        let named: Identity =
            serde_json::from_str(r#"{"user_id": 1, "display_name": "ayse"}"#).unwrap();
        assert_eq!(named.display_name.as_deref(), Some("ayse"));

        let missing: Identity = serde_json::from_str(r#"{"user_id": 1}"#).unwrap();
        assert_eq!(missing.display_name, None);
    }
}
