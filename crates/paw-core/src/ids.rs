//! ID prefix constants.
//!
//! IDs are generated by the store as `{prefix}-{8 hex chars}`, e.g. `pnt-a3f8b2c1`.

/// Prefix for committed point records.
pub const PREFIX_POINT: &str = "pnt";

/// Entity type label used in `NotFound` errors for point records.
pub const ENTITY_POINT: &str = "point";

/// Returns true if `id` looks like a point ID (`pnt-` followed by hex).
#[must_use]
pub fn is_point_id(id: &str) -> bool {
    id.strip_prefix(PREFIX_POINT)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_point_ids() {
        assert!(is_point_id("pnt-a3f8b2c1"));
        assert!(!is_point_id("pnt-"));
        assert!(!is_point_id("ses-a3f8b2c1"));
        assert!(!is_point_id("pnt-zzzz"));
    }
}
