//! Graphviz DOT output.

use std::fmt::Write as _;

use cardeps_graph::{DependencyGraph, EdgeOrigin, Overlay, UnitFilter};

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Edge color of each overlay class.
pub fn origin_color(origin: EdgeOrigin) -> &'static str {
    match origin {
        EdgeOrigin::RegexOnly => "blue",
        EdgeOrigin::StructuralOnly => "green",
        EdgeOrigin::Both => "red",
    }
}

/// One node per allowed unit and one edge per dependency between allowed units.
pub fn graph_to_dot(graph: &DependencyGraph, filter: &UnitFilter) -> String {
    let mut output = String::from("digraph UnitDependencies {\n");

    for unit in graph.units().filter(|u| filter.allows(u.as_str())) {
        let _ = writeln!(output, "    \"{}\";", escape_label(unit.as_str()));
    }

    for (from, to, _) in graph.edges() {
        if filter.allows_edge(from.as_str(), to.as_str()) {
            let _ = writeln!(
                output,
                "    \"{}\" -> \"{}\";",
                escape_label(from.as_str()),
                escape_label(to.as_str())
            );
        }
    }

    output.push_str("}\n");
    output
}

/// Like [`graph_to_dot`], with edges colored by which strategy found them.
pub fn overlay_to_dot(overlay: &Overlay, filter: &UnitFilter) -> String {
    let mut output = String::from("digraph UnitDependencies {\n");

    for unit in overlay.units().filter(|u| filter.allows(u.as_str())) {
        let _ = writeln!(output, "    \"{}\";", escape_label(unit.as_str()));
    }

    for (from, to, origin) in overlay.edges() {
        if filter.allows_edge(from.as_str(), to.as_str()) {
            let _ = writeln!(
                output,
                "    \"{}\" -> \"{}\" [color={}];",
                escape_label(from.as_str()),
                escape_label(to.as_str()),
                origin_color(origin)
            );
        }
    }

    output.push_str("}\n");
    output
}
