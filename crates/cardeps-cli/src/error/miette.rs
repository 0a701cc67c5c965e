//! Conversion of CLI errors into miette reports for the final diagnostic.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into the report printed by `main`.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analysis(e) => analysis_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert an analysis failure, adding a hint where one is known.
pub fn analysis_error_to_miette(err: cardeps_graph::Error) -> Report {
    use cardeps_graph::Error;

    match err {
        Error::MalformedXml { .. } | Error::NotUtf8 { .. } | Error::InvalidDescriptor { .. } => miette::miette!(
            "{}\n\nHint: Fix or remove the file; the analysis never skips unreadable documents",
            err
        ),
        Error::ArtifactCollision { .. } => miette::miette!(
            "{}\n\nHint: Rename one of the artifacts or run with --collisions override",
            err
        ),
        Error::InvalidExclusion { .. } => miette::miette!(
            "{}\n\nHint: --exclude takes a regular expression, e.g. 'Test$|^Legacy'",
            err
        ),
        _ => miette::miette!("{}", err),
    }
}
