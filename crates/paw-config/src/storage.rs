//! Storage configuration.

use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "pawpoints.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path to the libSQL database file, or `":memory:"`.
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.db_path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_path_is_detected() {
        assert!(!StorageConfig::default().is_in_memory());
        let memory = StorageConfig {
            db_path: ":memory:".into(),
        };
        assert!(memory.is_in_memory());
    }
}
