use clap::ValueEnum;

use paw_core::policy::{Identity, UserId};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub user: UserId,
    pub name: Option<String>,
    pub db: Option<String>,
    pub quiet: bool,
    pub verbose: bool,
}

impl GlobalFlags {
    /// The identity one-shot commands act as.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.user, self.name.clone())
    }
}
