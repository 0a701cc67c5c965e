use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::enums::*;

/// Available cardeps subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the unit dependency graph and write it out
    ///
    /// Reads every artifact.xml to learn artifact ownership, scans all other
    /// XML files for references, and writes DOT, text and/or JSON outputs.
    Analyze(AnalyzeArgs),

    /// List the artifacts every unit declares
    Inventory(InventoryArgs),
}

/// Options shared by every command that walks a project tree
#[derive(Args, Debug, Default, Clone)]
pub struct WalkArgs {
    /// Root directory of the integration project
    ///
    /// Defaults to the current directory or the `root` configuration key.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (TOML, or JSON with a .json extension)
    ///
    /// Without this flag, ./cardeps.toml is used when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// How the owning unit of an artifact.xml is located
    #[arg(long, value_enum, value_name = "LAYOUT")]
    pub descriptor_layout: Option<DescriptorLayoutArg>,

    /// Directory names never descended into (repeatable; replaces the default `target`)
    #[arg(long = "skip-dir", value_name = "NAME")]
    pub skip_dirs: Vec<String>,
}

/// Arguments for the analyze command
#[derive(Args, Debug, Default, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub walk: WalkArgs,

    /// Directory the output files are written to
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only show these units (comma separated); overrides --exclude
    ///
    /// Examples:
    ///   cardeps analyze --units OrdersCar,BillingCar
    #[arg(short, long, value_delimiter = ',', value_name = "UNIT")]
    pub units: Vec<String>,

    /// Hide units whose name matches this regular expression
    #[arg(short, long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Extraction strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Output formats (comma separated)
    #[arg(short, long = "format", value_enum, value_delimiter = ',', value_name = "FORMAT")]
    pub formats: Vec<OutputFormat>,

    /// Handling of artifact names declared by more than one unit
    #[arg(long, value_enum)]
    pub collisions: Option<CollisionArg>,

    /// What a get-property('..') expression contributes as a reference
    #[arg(long, value_enum)]
    pub property_capture: Option<PropertyCaptureArg>,
}

/// Arguments for the inventory command
#[derive(Args, Debug, Default, Clone)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub walk: WalkArgs,

    /// Print the inventory as JSON
    #[arg(long)]
    pub json: bool,
}
