use std::sync::Arc;

use paw_bot::Bot;
use paw_config::PawConfig;
use paw_db::service::PawService;

use crate::cli::GlobalFlags;

/// Everything a command handler needs: resolved config and the bot core.
pub struct AppContext {
    pub config: PawConfig,
    pub bot: Bot,
}

impl AppContext {
    pub async fn init(mut config: PawConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(db) = &flags.db {
            config.storage.db_path.clone_from(db);
        }

        if config.storage.is_in_memory() {
            tracing::warn!("in-memory database, points are dropped on exit");
        }

        let policy = config.moderation.policy();
        let service = PawService::new_local(&config.storage.db_path, policy).await?;
        tracing::debug!(
            db_path = %config.storage.db_path,
            moderation = policy.is_enabled(),
            "point store ready"
        );

        let bot = Bot::from_config(Arc::new(service), &config);
        Ok(Self { config, bot })
    }
}
