//! Inbound turn envelope, commands, and structured button actions.
//!
//! A transport converts each chat message into exactly one [`InboundTurn`].
//! Callback payloads are parsed into an [`Action`] once, here at the boundary,
//! so business logic never splits strings.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, TurnKind};
use crate::errors::CoreError;
use crate::policy::Identity;

/// One inbound unit of user interaction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Turn {
    /// A shared location.
    Location { lat: f64, lon: f64 },
    /// A plain text message.
    Text { text: String },
    /// An uploaded image, referenced by an opaque id from the transport.
    Image {
        #[serde(rename = "ref")]
        photo_ref: String,
    },
    /// A named command (`/start`, `add`, `nearest`, ...).
    Command { name: String },
    /// A pressed button targeting one record.
    Action(Action),
}

impl Turn {
    #[must_use]
    pub const fn kind(&self) -> TurnKind {
        match self {
            Self::Location { .. } => TurnKind::Location,
            Self::Text { .. } => TurnKind::Text,
            Self::Image { .. } => TurnKind::Image,
            Self::Command { .. } => TurnKind::Command,
            Self::Action(_) => TurnKind::Action,
        }
    }
}

/// A turn together with the identity of the user who sent it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct InboundTurn {
    #[serde(flatten)]
    pub from: Identity,
    pub turn: Turn,
}

impl InboundTurn {
    #[must_use]
    pub const fn new(from: Identity, turn: Turn) -> Self {
        Self { from, turn }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A structured request against one record: `{kind, target_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub target_id: String,
}

impl Action {
    #[must_use]
    pub fn new(kind: ActionKind, target_id: impl Into<String>) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.target_id)
    }
}

impl FromStr for Action {
    type Err = CoreError;

    /// Parse `<kind>:<id>` (or the legacy `<kind>_<id>`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, target) = s
            .split_once(':')
            .or_else(|| s.split_once('_'))
            .ok_or_else(|| CoreError::Validation(format!("malformed action '{s}'")))?;

        let kind = match kind.trim() {
            "delete" => ActionKind::Delete,
            "approve" => ActionKind::Approve,
            "reject" => ActionKind::Reject,
            other => {
                return Err(CoreError::Validation(format!(
                    "unknown action kind '{other}'"
                )));
            }
        };

        let target = target.trim();
        if target.is_empty() {
            return Err(CoreError::Validation(format!("action '{s}' has no target")));
        }

        Ok(Self::new(kind, target))
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Commands understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Help,
    Add,
    Nearest,
    List,
    Mine,
    Pending,
    Stats,
    Cancel,
}

impl Command {
    /// Resolve a command name. Leading `/` and a `@botname` suffix are ignored,
    /// matching is case-insensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('/');
        let name = name.split('@').next().unwrap_or(name).to_ascii_lowercase();
        match name.as_str() {
            "start" => Some(Self::Start),
            "help" | "yardim" => Some(Self::Help),
            "add" | "submit" => Some(Self::Add),
            "nearest" | "near" => Some(Self::Nearest),
            "list" | "listele" => Some(Self::List),
            "mine" => Some(Self::Mine),
            "pending" => Some(Self::Pending),
            "stats" | "admin" => Some(Self::Stats),
            "cancel" => Some(Self::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("delete:pnt-a3f8b2c1", ActionKind::Delete)]
    #[case("approve_pnt-a3f8b2c1", ActionKind::Approve)]
    #[case("reject: pnt-a3f8b2c1 ", ActionKind::Reject)]
    fn parses_action_payloads(#[case] raw: &str, #[case] kind: ActionKind) {
        let action: Action = raw.parse().unwrap();
        assert_eq!(action, Action::new(kind, "pnt-a3f8b2c1"));
    }

    #[rstest]
    #[case("delete")]
    #[case("delete:")]
    #[case("publish:pnt-a3f8b2c1")]
    fn rejects_malformed_actions(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<Action>(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn display_form_parses_back() {
        let action = Action::new(ActionKind::Delete, "pnt-00ff00ff");
        assert_eq!(action.to_string(), "delete:pnt-00ff00ff");
        assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
    }

    #[rstest]
    #[case("/start", Some(Command::Start))]
    #[case("/Nearest@pawpoints_bot", Some(Command::Nearest))]
    #[case("listele", Some(Command::List))]
    #[case("launch", None)]
    fn resolves_command_names(#[case] raw: &str, #[case] expected: Option<Command>) {
        assert_eq!(Command::parse(raw), expected);
    }

    #[test]
    fn inbound_turn_wire_format() {
        let json = r#"{"user_id":7,"display_name":"ayse","turn":{"type":"location","lat":38.487,"lon":27.132}}"#;
        let inbound: InboundTurn = serde_json::from_str(json).unwrap();
        assert_eq!(inbound.from, Identity::new(7, Some("ayse".into())));
        assert_eq!(
            inbound.turn,
            Turn::Location {
                lat: 38.487,
                lon: 27.132
            }
        );

        let image: Turn = serde_json::from_str(r#"{"type":"image","ref":"file-123"}"#).unwrap();
        assert_eq!(
            image,
            Turn::Image {
                photo_ref: "file-123".into()
            }
        );

        let action: Turn =
            serde_json::from_str(r#"{"type":"action","kind":"delete","target_id":"pnt-1"}"#)
                .unwrap();
        assert_eq!(action.kind(), TurnKind::Action);
    }
}
