//! Inventory command implementation.
//!
//! Prints what every unit declares without scanning configuration files.

use std::fmt::Write as _;

use cardeps_graph::{Inventory, ReverseIndex, build_inventory, worker_pool};

use crate::cli::InventoryArgs;
use crate::config::CardepsConfig;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the inventory command.
///
/// The listing goes to stdout; collisions are reported on stderr.
pub fn execute(args: InventoryArgs) -> Result<()> {
    let config = CardepsConfig::load_for_inventory(&args)?;
    config.validate()?;

    let pool = worker_pool(config.workers)?;
    let inventory = build_inventory(
        &config.root,
        &config.walk_policy(),
        config.descriptor_layout,
        &pool,
    )?;
    let index = ReverseIndex::build(&inventory, config.collisions)?;

    for collision in index.collisions() {
        ui::warning(&format!(
            "Artifact {} is declared by {} and {}",
            collision.artifact, collision.previous, collision.owner
        ));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&inventory)
            .context("Failed to serialize inventory")?;
        println!("{json}");
    } else {
        print!("{}", inventory_to_text(&inventory));
    }

    Ok(())
}

/// `unit (n artifacts)` followed by one indented `name  type` line per
/// declaration.
fn inventory_to_text(inventory: &Inventory) -> String {
    let mut output = String::new();
    for (unit, declarations) in inventory.iter() {
        let _ = writeln!(output, "{unit} ({} artifacts)", declarations.len());
        let width = declarations
            .iter()
            .map(|d| d.name.as_str().chars().count())
            .max()
            .unwrap_or(0);
        for declaration in declarations {
            let _ = writeln!(
                output,
                "  {:<width$}  {}",
                declaration.name.as_str(),
                declaration.kind
            );
        }
    }
    output
}
