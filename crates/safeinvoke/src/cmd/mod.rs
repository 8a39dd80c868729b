use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod schemas;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded command outcome through its schemas.
    Check(CheckArgs),
    /// List commands with registered schemas.
    Schemas(SchemasArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Schemas(args) => schemas::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SchemaDirArgs {
    /// Directory of `<command>.schema.json` / `<command>.err.schema.json` files.
    #[arg(long, value_name = "DIR", env = "SAFEINVOKE_SCHEMAS")]
    pub schemas: PathBuf,
    /// Close object schemas against undeclared properties.
    #[arg(long)]
    pub strict_schemas: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Command name.
    pub command: String,
    #[command(flatten)]
    pub schema_dir: SchemaDirArgs,
    /// JSON the command resolved with (`@path` reads a file).
    #[arg(long, value_name = "JSON", conflicts_with = "rejected", required_unless_present = "rejected")]
    pub resolved: Option<String>,
    /// JSON the command rejected with (`@path` reads a file).
    #[arg(long, value_name = "JSON")]
    pub rejected: Option<String>,
    /// JSON object of call arguments. Only its shape is checked; the
    /// recorded outcome is replayed whatever the arguments are.
    #[arg(long, value_name = "JSON")]
    pub args: Option<String>,
    /// Return validation failures as data instead of failing.
    #[arg(long)]
    pub no_throw: bool,
}

#[derive(Args, Debug)]
pub struct SchemasArgs {
    #[command(flatten)]
    pub schema_dir: SchemaDirArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
