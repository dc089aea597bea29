use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Read JSON turns from stdin, write one JSON reply per line to stdout.
    Chat,
    /// List approved points.
    List,
    /// Approved points nearest to a position.
    Nearest(NearestArgs),
    /// Your own points, every status.
    Mine,
    /// Points awaiting review (admin).
    Pending,
    /// Approve a pending point (admin).
    Approve(TargetArgs),
    /// Reject a pending point (admin).
    Reject(TargetArgs),
    /// Delete a point you own (or any point, as admin).
    Delete(TargetArgs),
    /// Edit a point you own (or any point, as admin).
    Edit(EditArgs),
    /// Moderation counts (admin).
    Stats,
    /// Render views of the approved set for a map or list renderer.
    Map,
    /// Print the JSON Schema of the chat wire types.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct NearestArgs {
    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,
    /// How many points to return (defaults to `query.nearest_limit`).
    #[arg(short = 'k', long)]
    pub limit: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct TargetArgs {
    /// Point ID (e.g. pnt-a3f8b2c1).
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct EditArgs {
    /// Point ID.
    pub id: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub schedule: Option<String>,
    /// Opaque photo reference.
    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SchemaTarget {
    /// The inbound turn envelope.
    Turn,
    /// Reply values.
    Reply,
    /// Error objects.
    Error,
    #[default]
    All,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Which wire type to print.
    #[arg(value_enum, default_value_t = SchemaTarget::All)]
    pub target: SchemaTarget,
}
