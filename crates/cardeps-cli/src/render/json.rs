//! JSON output of filtered graphs.

use std::collections::BTreeMap;

use cardeps_graph::{DependencyEdge, DependencyGraph, EdgeOrigin, Overlay, UnitFilter, UnitName};

use crate::error::Result;

/// `{ unit: { dependency: { present, provenance } } }` over allowed units.
pub fn graph_to_json(graph: &DependencyGraph, filter: &UnitFilter) -> Result<String> {
    let mut view: BTreeMap<&UnitName, BTreeMap<&UnitName, &DependencyEdge>> = graph
        .units()
        .filter(|unit| filter.allows(unit.as_str()))
        .map(|unit| (unit, BTreeMap::new()))
        .collect();

    for (from, to, edge) in graph.edges() {
        if !filter.allows(to.as_str()) {
            continue;
        }
        if let Some(targets) = view.get_mut(from) {
            targets.insert(to, edge);
        }
    }

    Ok(serde_json::to_string_pretty(&view)?)
}

/// `{ unit: { dependency: origin } }` over allowed units.
pub fn overlay_to_json(overlay: &Overlay, filter: &UnitFilter) -> Result<String> {
    let mut view: BTreeMap<&UnitName, BTreeMap<&UnitName, EdgeOrigin>> = overlay
        .units()
        .filter(|unit| filter.allows(unit.as_str()))
        .map(|unit| (unit, BTreeMap::new()))
        .collect();

    for (from, to, origin) in overlay.edges() {
        if !filter.allows(to.as_str()) {
            continue;
        }
        if let Some(targets) = view.get_mut(from) {
            targets.insert(to, origin);
        }
    }

    Ok(serde_json::to_string_pretty(&view)?)
}
