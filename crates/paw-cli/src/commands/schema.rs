use paw_core::errors::ErrorBody;
use paw_core::responses::Reply;
use paw_core::turns::InboundTurn;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaTarget};
use crate::commands::chat::CallbackLine;
use crate::output::output;

/// Handle `pawpoints schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(args.target)?, flags.format)
}

fn schema_value(target: SchemaTarget) -> anyhow::Result<serde_json::Value> {
    let value = match target {
        SchemaTarget::Turn => serde_json::to_value(schemars::schema_for!(InboundTurn))?,
        SchemaTarget::Reply => serde_json::to_value(schemars::schema_for!(Reply))?,
        SchemaTarget::Error => serde_json::to_value(schemars::schema_for!(ErrorBody))?,
        SchemaTarget::All => json!({
            "turn": serde_json::to_value(schemars::schema_for!(InboundTurn))?,
            "callback": serde_json::to_value(schemars::schema_for!(CallbackLine))?,
            "reply": serde_json::to_value(schemars::schema_for!(Reply))?,
            "error": serde_json::to_value(schemars::schema_for!(ErrorBody))?,
        }),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_bundles_every_wire_type() {
        let value = schema_value(SchemaTarget::All).unwrap();
        for key in ["turn", "callback", "reply", "error"] {
            assert!(value.get(key).is_some_and(serde_json::Value::is_object), "missing {key}");
        }
    }

    #[test]
    fn turn_schema_names_the_envelope() {
        let value = schema_value(SchemaTarget::Turn).unwrap();
        assert_eq!(value["title"], "InboundTurn");
    }
}
