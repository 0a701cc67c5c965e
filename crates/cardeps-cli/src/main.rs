//! Cardeps CLI - dependency maps for multi-unit integration projects.
//!
//! Parses arguments, initializes logging and dispatches to a command.

use cardeps_cli::{cli, commands, error, logger};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args),
        cli::Command::Inventory(inventory_args) => commands::inventory_execute(inventory_args),
    };

    result.map_err(error::cli_error_to_miette)
}
