//! Plain-text dependency report.
//!
//! One block per allowed unit, in name order:
//!
//! ```text
//! CarA -> CarB
//!   OrderProxy -> SeqB
//!   Refunds    -> SeqB
//!
//! CarB
//!
//! ```
//!
//! Provenance lines are `<source file> -> <artifact>`, with the arrows of an
//! edge aligned to its longest source file name. A unit without shown
//! dependencies prints only its name.

use std::fmt::Write as _;

use cardeps_graph::{DependencyEdge, DependencyGraph, UnitFilter};

pub fn graph_to_text(graph: &DependencyGraph, filter: &UnitFilter) -> String {
    let mut output = String::new();

    for unit in graph.units().filter(|u| filter.allows(u.as_str())) {
        let mut printed = false;
        for (target, edge) in graph.dependencies(unit.as_str()) {
            if !filter.allows(target.as_str()) {
                continue;
            }
            printed = true;
            let _ = writeln!(output, "{unit} -> {target}");
            write_provenance(&mut output, edge);
        }
        if !printed {
            let _ = writeln!(output, "{unit}");
        }
        output.push('\n');
    }

    output
}

fn write_provenance(output: &mut String, edge: &DependencyEdge) {
    let width = edge
        .provenance
        .keys()
        .map(|source| source.chars().count())
        .max()
        .unwrap_or(0);

    for (source, artifacts) in &edge.provenance {
        for artifact in artifacts {
            let _ = writeln!(output, "  {source:<width$} -> {artifact}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample;

    #[test]
    fn test_report_layout() {
        let (regex, _) = sample();
        let text = graph_to_text(&regex, &UnitFilter::allow_all());
        assert_eq!(
            text,
            "CarA -> CarB\n  \
             OrderProxy -> SeqB\n  \
             Refunds    -> SeqB\n\
             CarA -> CarC\n  \
             OrderProxy -> LogTemplate\n\
             \n\
             CarB\n\
             \n\
             CarC\n\
             \n"
        );
    }

    #[test]
    fn test_hidden_target_leaves_bare_unit() {
        let (regex, _) = sample();
        let filter = UnitFilter::new(["CarA", "CarC"], None).unwrap();
        let text = graph_to_text(&regex, &filter);
        assert!(!text.contains("CarB"));
        assert!(text.starts_with("CarA -> CarC\n"));
    }
}
