//! Cardeps CLI - dependency maps for multi-unit integration projects.
//!
//! Thin shell around [`cardeps_graph`]: everything that touches the terminal,
//! the process environment or output files lives here.
//!
//! - [`cli`] - argument definitions
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`commands`] - `analyze` and `inventory`
//! - [`render`] - DOT, text and JSON output of finished graphs
//! - [`error`] - CLI error types and diagnostic conversion
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod render;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
