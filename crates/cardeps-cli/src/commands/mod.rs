//! Command implementations for the cardeps CLI.
//!
//! - [`analyze`] - build dependency graphs and write outputs
//! - [`inventory`] - list declared artifacts per unit
//!
//! Each command provides an `execute` function that takes its parsed
//! arguments and returns a Result.

pub mod analyze;
pub mod inventory;

pub use analyze::execute as analyze_execute;
pub use inventory::execute as inventory_execute;
