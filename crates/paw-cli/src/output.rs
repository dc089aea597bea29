use paw_core::errors::{CoreError, ErrorBody};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// One compact JSON line, for the chat stream.
pub fn line<T: Serialize>(value: &T) -> anyhow::Result<String> {
    render(value, OutputFormat::Raw)
}

/// Error object written in place of a reply.
pub fn error_line(err: &CoreError) -> anyhow::Result<String> {
    line(&ErrorBody::from(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn raw_is_single_line() {
        let value = json!({"kind": "deleted", "id": "pnt-1"});
        let rendered = render(&value, OutputFormat::Raw).unwrap();
        assert!(!rendered.contains('\n'));
        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn error_line_carries_kind() {
        let rendered = error_line(&CoreError::point_not_found("pnt-1")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["error"], "not_found");
        assert_eq!(value["message"], "Entity not found: point pnt-1");
    }
}
