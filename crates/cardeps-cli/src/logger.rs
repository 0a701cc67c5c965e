//! Logging setup for the cardeps CLI.
//!
//! Diagnostics go through `tracing`; this module installs the single global
//! subscriber. Verbosity, in order of precedence:
//!
//! 1. `--verbose`: DEBUG for the cardeps crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`, when set
//! 4. INFO for the cardeps crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "cardeps_graph=debug,cardeps_cli=debug,cardeps=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "cardeps_graph=info,cardeps_cli=info,cardeps=info";

/// Build the level filter for the given flags.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
///
/// Logs are written to stderr so that stdout stays usable for command output
/// such as `cardeps inventory --json`.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Whether stderr should receive ANSI colors.
///
/// `NO_COLOR` disables and `FORCE_COLOR` forces colors; otherwise the
/// terminal's capabilities decide.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
