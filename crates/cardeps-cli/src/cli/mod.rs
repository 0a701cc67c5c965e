//! Command-line interface definition.
//!
//! - `cardeps analyze` - build the unit dependency graph and write outputs
//! - `cardeps inventory` - list the artifacts every unit declares

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command, InventoryArgs, WalkArgs};
pub use enums::*;

/// Cardeps - dependency maps for multi-unit integration projects
#[derive(Parser, Debug)]
#[command(
    name = "cardeps",
    version,
    about = "Map dependencies between the deployable units of an integration project",
    long_about = "Cardeps reads every artifact.xml descriptor of an integration project to learn\n\
                  which unit owns which artifact, then scans the configuration files of each unit\n\
                  for references to artifacts owned by other units.\n\n\
                  Settings are also read from ./cardeps.toml and from CARDEPS_* environment\n\
                  variables (e.g. CARDEPS_STRATEGY=regex, CARDEPS_UNITS=CarA,CarB)."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows per-file decisions such as skipped files and unrecognized
    /// document shapes.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
