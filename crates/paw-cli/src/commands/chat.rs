//! Local JSON-lines transport.
//!
//! Each stdin line is one inbound turn, either the `InboundTurn` envelope or a
//! pressed button as `{"user_id": .., "callback": "delete:pnt-.."}`. Each turn
//! produces exactly one stdout line: the reply, or an error object.

use paw_bot::Bot;
use paw_core::errors::CoreError;
use paw_core::policy::{Identity, UserId};
use paw_core::turns::{Action, InboundTurn, Turn};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::context::AppContext;
use crate::output;

/// Button press carrying raw callback data.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CallbackLine {
    pub user_id: UserId,
    #[serde(default)]
    pub display_name: Option<String>,
    /// `<kind>:<id>`, e.g. `approve:pnt-a3f8b2c1`.
    pub callback: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatLine {
    Turn(InboundTurn),
    Callback(CallbackLine),
}

/// Decode one stdin line into a turn.
fn parse_line(raw: &str) -> Result<InboundTurn, CoreError> {
    let line: ChatLine = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("unreadable turn: {e}")))?;
    match line {
        ChatLine::Turn(turn) => Ok(turn),
        ChatLine::Callback(CallbackLine {
            user_id,
            display_name,
            callback,
        }) => {
            let action: Action = callback.parse()?;
            Ok(InboundTurn::new(
                Identity::new(user_id, display_name),
                Turn::Action(action),
            ))
        }
    }
}

/// Handle one line end to end and return the output line.
async fn process_line(bot: &Bot, raw: &str) -> anyhow::Result<String> {
    let result = match parse_line(raw) {
        Ok(inbound) => {
            let user_id = inbound.from.user_id;
            let result = bot.handle(inbound).await;
            if let Err(err) = &result {
                tracing::debug!(user_id, kind = ?err.kind(), error = %err, "turn failed");
            }
            result
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(reply) => output::line(&reply),
        Err(err) => output::error_line(&err),
    }
}

/// Handle `pawpoints chat`.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(raw) = lines.next_line().await? {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let mut rendered = process_line(&ctx.bot, raw).await?;
        rendered.push('\n');
        stdout.write_all(rendered.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use paw_bot::BotSettings;
    use paw_core::enums::ActionKind;
    use paw_core::policy::ModerationPolicy;
    use paw_db::service::PawService;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    async fn bot() -> Bot {
        let store = PawService::new_local(":memory:", ModerationPolicy::with_admin(42))
            .await
            .unwrap();
        Bot::new(Arc::new(store), BotSettings::default())
    }

    async fn exchange(bot: &Bot, raw: &str) -> Value {
        serde_json::from_str(&process_line(bot, raw).await.unwrap()).unwrap()
    }

    #[test]
    fn parses_envelope_and_callback_lines() {
        let turn = parse_line(r#"{"user_id":7,"turn":{"type":"text","text":"hi"}}"#).unwrap();
        assert_eq!(turn.from, Identity::new(7, None));

        let turn = parse_line(r#"{"user_id":42,"callback":"approve_pnt-00ff00ff"}"#).unwrap();
        assert_eq!(
            turn.turn,
            Turn::Action(Action::new(ActionKind::Approve, "pnt-00ff00ff"))
        );

        assert!(matches!(
            parse_line(r#"{"user_id":42,"callback":"launch:pnt-1"}"#),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(parse_line("not json"), Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn full_submission_over_the_wire() {
        let bot = bot().await;
        let user = r#""user_id":7,"display_name":"ayse""#;

        let reply = exchange(&bot, &format!(r#"{{{user},"turn":{{"type":"command","name":"/add"}}}}"#)).await;
        assert_eq!(reply["kind"], "prompt");
        assert_eq!(reply["prompt"], "share_location");

        exchange(&bot, &format!(r#"{{{user},"turn":{{"type":"location","lat":38.487,"lon":27.132}}}}"#)).await;
        exchange(&bot, &format!(r#"{{{user},"turn":{{"type":"text","text":"Park entrance"}}}}"#)).await;
        exchange(&bot, &format!(r#"{{{user},"turn":{{"type":"text","text":"daily 18:00"}}}}"#)).await;
        let reply = exchange(&bot, &format!(r#"{{{user},"turn":{{"type":"image","ref":"file-1"}}}}"#)).await;

        assert_eq!(reply["kind"], "submitted");
        assert_eq!(reply["point"]["status"], "pending");
        assert_eq!(reply["point"]["photo_ref"], "file-1");
        let id = reply["point"]["id"].as_str().unwrap().to_string();

        let denied = exchange(&bot, &format!(r#"{{"user_id":8,"callback":"delete:{id}"}}"#)).await;
        assert_eq!(denied["error"], "authorization");

        let approved = exchange(&bot, &format!(r#"{{"user_id":42,"callback":"approve:{id}"}}"#)).await;
        assert_eq!(approved["kind"], "moderated");
        assert_eq!(approved["point"]["status"], "approved");
    }

    #[tokio::test]
    async fn bad_lines_become_error_objects() {
        let bot = bot().await;
        let reply = exchange(&bot, "{").await;
        assert_eq!(reply["error"], "validation");
    }
}
