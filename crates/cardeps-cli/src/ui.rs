//! Status lines for interactive output.
//!
//! Messages go to stderr; stdout is reserved for command results.

use console::style;

pub fn success(message: &str) {
    eprintln!("{} {}", style("✔").green().bold(), message);
}

pub fn info(message: &str) {
    eprintln!("{} {}", style("ℹ").blue().bold(), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(message).yellow());
}
