//! # paw-config
//!
//! Layered configuration loading for pawpoints using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PAWPOINTS_*` prefix, `__` as separator)
//! 2. The legacy `ADMIN_ID` variable, mapped to `moderation.admin_user_id`
//! 3. Project-level `.pawpoints/config.toml`
//! 4. User-level `~/.config/pawpoints/config.toml`
//! 5. Built-in defaults
//!
//! # Usage
//!
//! ```no_run
//! use paw_config::PawConfig;
//!
//! let config = PawConfig::load_with_dotenv().expect("config");
//! if config.moderation.is_enabled() {
//!     println!("admin: {}", config.moderation.admin_user_id);
//! }
//! ```

mod error;
mod intake;
mod moderation;
mod query;
mod storage;

pub use error::ConfigError;
pub use intake::IntakeConfig;
pub use moderation::ModerationConfig;
pub use query::QueryConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment prefix for all pawpoints settings.
pub const ENV_PREFIX: &str = "PAWPOINTS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PawConfig {
    #[serde(default)]
    pub moderation: ModerationConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl PawConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment (tests layer on top of
    /// [`Self::figment`]).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pawpoints/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: legacy single-variable admin id
        figment = figment.merge(
            Env::raw()
                .only(&["ADMIN_ID"])
                .map(|_| "moderation.admin_user_id".into()),
        );

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
    }

    /// Reject values the core cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moderation.admin_user_id < 0 {
            return Err(ConfigError::invalid(
                "moderation.admin_user_id",
                "must be 0 (disabled) or a positive user id",
            ));
        }
        if self.query.nearest_limit == 0 {
            return Err(ConfigError::invalid("query.nearest_limit", "must be at least 1"));
        }
        if self.intake.max_text_len == 0 {
            return Err(ConfigError::invalid("intake.max_text_len", "must be at least 1"));
        }
        if self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::invalid("storage.db_path", "must not be empty"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pawpoints").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or uses the current
    /// dir. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
