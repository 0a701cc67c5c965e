//! Presentation of finished graphs.
//!
//! Renderers only read graphs and apply the unit filter; they never resolve
//! references. Files are named `<strategy>-graph.<ext>`, and the overlay of a
//! run with both strategies is written as `both-graph.<ext>`.

pub mod dot;
pub mod json;
pub mod text;

use std::fs;
use std::path::{Path, PathBuf};

use cardeps_graph::{Analysis, DependencyGraph, Overlay, UnitFilter};
use tracing::debug;

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};

const OVERLAY_PREFIX: &str = "both";

/// Render one strategy's graph in `format`.
pub fn render_graph(
    graph: &DependencyGraph,
    format: OutputFormat,
    filter: &UnitFilter,
) -> Result<String> {
    match format {
        OutputFormat::Dot => Ok(dot::graph_to_dot(graph, filter)),
        OutputFormat::Text => Ok(text::graph_to_text(graph, filter)),
        OutputFormat::Json => json::graph_to_json(graph, filter),
    }
}

/// Render the overlay in `format`; there is no text form of an overlay.
pub fn render_overlay(
    overlay: &Overlay,
    format: OutputFormat,
    filter: &UnitFilter,
) -> Result<Option<String>> {
    match format {
        OutputFormat::Dot => Ok(Some(dot::overlay_to_dot(overlay, filter))),
        OutputFormat::Json => json::overlay_to_json(overlay, filter).map(Some),
        OutputFormat::Text => Ok(None),
    }
}

pub fn output_path(out_dir: &Path, prefix: &str, format: OutputFormat) -> PathBuf {
    out_dir.join(format!("{prefix}-graph.{}", format.extension()))
}

fn write_output(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents).map_err(|source| CliError::Output {
        path: path.clone(),
        source,
    })?;
    debug!(file = %path.display(), "wrote output");
    Ok(path)
}

/// Write every requested output of `analysis` into `out_dir`.
///
/// Returns the written paths in write order.
pub fn write_outputs(
    analysis: &Analysis,
    formats: &[OutputFormat],
    filter: &UnitFilter,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| CliError::Output {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let graphs = [
        ("regex", analysis.regex.as_ref()),
        ("structural", analysis.structural.as_ref()),
    ];

    let mut written = Vec::new();
    for (prefix, graph) in graphs {
        let Some(graph) = graph else { continue };
        for &format in formats {
            let contents = render_graph(graph, format, filter)?;
            written.push(write_output(output_path(out_dir, prefix, format), &contents)?);
        }
    }

    if let Some(overlay) = &analysis.overlay {
        for &format in formats {
            if let Some(contents) = render_overlay(overlay, format, filter)? {
                written.push(write_output(
                    output_path(out_dir, OVERLAY_PREFIX, format),
                    &contents,
                )?);
            }
        }
    }

    Ok(written)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cardeps_graph::{
        Aggregator, CollisionPolicy, DeclaredArtifact, Inventory, ReverseIndex, UnitName,
    };

    /// Regex and structural graphs over CarA, CarB and CarC.
    pub(crate) fn sample() -> (DependencyGraph, DependencyGraph) {
        let inventory: Inventory = [
            ("CarA", "OrderProxy"),
            ("CarB", "SeqB"),
            ("CarC", "LogTemplate"),
        ]
        .into_iter()
        .map(|(unit, name)| (UnitName::from(unit), DeclaredArtifact::new(name, "synapse/sequence")))
        .collect();
        let index = ReverseIndex::build(&inventory, CollisionPolicy::Override).unwrap();
        let car_a = UnitName::from("CarA");

        let regex = Aggregator::new(&inventory, &index);
        regex.record(&car_a, "OrderProxy", ["OrderProxy", "SeqB", "LogTemplate"]);
        regex.record(&car_a, "Refunds", ["SeqB"]);

        let structural = Aggregator::new(&inventory, &index);
        structural.record(&car_a, "OrderProxy", ["SeqB"]);
        structural.record(&UnitName::from("CarB"), "SeqB", ["LogTemplate"]);

        (regex.into_graph(), structural.into_graph())
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("out"), "regex", OutputFormat::Text),
            PathBuf::from("out/regex-graph.txt")
        );
    }

    #[test]
    fn test_overlay_has_no_text_form() {
        let (regex, structural) = sample();
        let overlay = cardeps_graph::reconcile(&regex, &structural);
        let filter = UnitFilter::allow_all();
        assert!(render_overlay(&overlay, OutputFormat::Text, &filter).unwrap().is_none());
        assert!(render_overlay(&overlay, OutputFormat::Dot, &filter).unwrap().is_some());
    }
}
