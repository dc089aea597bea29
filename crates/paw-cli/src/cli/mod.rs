use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pawpoints` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pawpoints",
    version,
    about = "pawpoints - food-drop points for stray animals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// User ID to act as
    #[arg(short, long, global = true, default_value_t = 0, allow_negative_numbers = true)]
    pub user: i64,

    /// Display name recorded on new points
    #[arg(short, long, global = true)]
    pub name: Option<String>,

    /// Database path (overrides storage.db_path)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            user: self.user,
            name: self.name.clone(),
            db: self.db.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};
    use crate::cli::root_commands::SchemaTarget;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["pawpoints", "--format", "raw", "--user", "42", "pending"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.user, 42);
        assert!(matches!(cli.command, Commands::Pending));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["pawpoints", "approve", "pnt-a3f8b2c1", "-u", "42", "--quiet"])
            .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.global_flags().identity().user_id, 42);
        let Commands::Approve(args) = cli.command else {
            panic!("expected approve");
        };
        assert_eq!(args.id, "pnt-a3f8b2c1");
    }

    #[test]
    fn nearest_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "pawpoints", "nearest", "--lat", "-33.86", "--lon", "-70.65", "-k", "3",
        ])
        .expect("cli should parse");

        let Commands::Nearest(args) = cli.command else {
            panic!("expected nearest");
        };
        assert_eq!(args.lat, -33.86);
        assert_eq!(args.lon, -70.65);
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["pawpoints", "--format", "table", "list"]).is_err());
    }

    #[test]
    fn schema_target_defaults_to_all() {
        let cli = Cli::try_parse_from(["pawpoints", "schema"]).expect("cli should parse");
        let Commands::Schema(args) = cli.command else {
            panic!("expected schema");
        };
        assert_eq!(args.target, SchemaTarget::All);
    }
}
