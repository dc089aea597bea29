//! Query configuration.

use serde::{Deserialize, Serialize};

/// Default number of results for a nearest query.
const fn default_nearest_limit() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// How many points a nearest query returns when the caller gives no `k`.
    #[serde(default = "default_nearest_limit")]
    pub nearest_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            nearest_limit: default_nearest_limit(),
        }
    }
}
