//! Diagnostic overlay of the regex and structural graphs.
//!
//! Each strategy's graph stays authoritative on its own; the overlay only
//! classifies which strategy discovered each unit-level edge.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::aggregate::DependencyGraph;
use crate::ids::UnitName;

/// Which strategies found an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeOrigin {
    RegexOnly,
    StructuralOnly,
    Both,
}

impl EdgeOrigin {
    fn from_presence(regex: bool, structural: bool) -> Option<Self> {
        match (regex, structural) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::RegexOnly),
            (false, true) => Some(Self::StructuralOnly),
            (false, false) => None,
        }
    }
}

impl fmt::Display for EdgeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RegexOnly => "regex-only",
            Self::StructuralOnly => "structural-only",
            Self::Both => "both",
        })
    }
}

/// Combined edge classification over two graphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overlay {
    units: BTreeSet<UnitName>,
    edges: BTreeMap<UnitName, BTreeMap<UnitName, EdgeOrigin>>,
}

impl Overlay {
    /// Nodes of either graph, in lexical order.
    pub fn units(&self) -> impl Iterator<Item = &UnitName> {
        self.units.iter()
    }

    pub fn origin(&self, from: &str, to: &str) -> Option<EdgeOrigin> {
        self.edges.get(from)?.get(to).copied()
    }

    /// Every classified edge, ordered by source then target unit.
    pub fn edges(&self) -> impl Iterator<Item = (&UnitName, &UnitName, EdgeOrigin)> {
        self.edges.iter().flat_map(|(from, targets)| {
            targets.iter().map(move |(to, origin)| (from, to, *origin))
        })
    }

    pub fn count(&self, origin: EdgeOrigin) -> usize {
        self.edges().filter(|(_, _, o)| *o == origin).count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }
}

/// Classify every present edge of `regex` and `structural`.
pub fn reconcile(regex: &DependencyGraph, structural: &DependencyGraph) -> Overlay {
    let mut overlay = Overlay {
        units: regex.units().chain(structural.units()).cloned().collect(),
        edges: BTreeMap::new(),
    };

    let pairs: BTreeSet<(&UnitName, &UnitName)> = regex
        .edges()
        .chain(structural.edges())
        .map(|(from, to, _)| (from, to))
        .collect();

    for (from, to) in pairs {
        let found_by_regex = regex.edge(from.as_str(), to.as_str()).is_some_and(|e| e.present);
        let found_structurally = structural
            .edge(from.as_str(), to.as_str())
            .is_some_and(|e| e.present);
        if let Some(origin) = EdgeOrigin::from_presence(found_by_regex, found_structurally) {
            overlay
                .edges
                .entry(from.clone())
                .or_default()
                .insert(to.clone(), origin);
        }
    }

    overlay
}
