//! Errors raised while loading pawpoints settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into `PawConfig`.
    #[error("failed to load pawpoints config: {0}")]
    Load(#[from] figment::Error),

    /// A setting parsed but is outside what the bot can run with.
    #[error("bad value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
