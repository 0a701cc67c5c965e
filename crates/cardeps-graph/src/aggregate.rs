//! Unit-level dependency graph and its concurrent aggregator.

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::ids::{ArtifactName, UnitName};
use crate::index::ReverseIndex;
use crate::inventory::Inventory;

/// Dependency of one unit on another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub present: bool,
    /// Source file name (without extension) → artifacts of the target unit it
    /// references.
    pub provenance: BTreeMap<String, BTreeSet<ArtifactName>>,
}

impl DependencyEdge {
    fn record(&mut self, source: &str, artifact: ArtifactName) {
        self.present = true;
        self.provenance
            .entry(source.to_string())
            .or_default()
            .insert(artifact);
    }

    /// Number of distinct (source, artifact) pairs behind this edge.
    pub fn reference_count(&self) -> usize {
        self.provenance.values().map(BTreeSet::len).sum()
    }
}

/// Mapping from unit → dependency unit → edge.
///
/// Every inventory unit has an outer entry, so units without outbound edges
/// are still nodes. Self-edges are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    units: BTreeMap<UnitName, BTreeMap<UnitName, DependencyEdge>>,
}

impl DependencyGraph {
    /// Empty graph with one node per inventory unit.
    pub fn seeded(inventory: &Inventory) -> Self {
        Self {
            units: inventory
                .units()
                .map(|unit| (unit.clone(), BTreeMap::new()))
                .collect(),
        }
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitName> {
        self.units.keys()
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&DependencyEdge> {
        self.units.get(from)?.get(to)
    }

    /// Outbound edges of `from`, ordered by target unit.
    pub fn dependencies<'a>(
        &'a self,
        from: &str,
    ) -> impl Iterator<Item = (&'a UnitName, &'a DependencyEdge)> + use<'a> {
        self.units
            .get(from)
            .into_iter()
            .flat_map(|targets| targets.iter())
            .filter(|(_, edge)| edge.present)
    }

    /// Every present edge, ordered by source then target unit.
    pub fn edges(&self) -> impl Iterator<Item = (&UnitName, &UnitName, &DependencyEdge)> {
        self.units.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .filter(|(_, edge)| edge.present)
                .map(move |(to, edge)| (from, to, edge))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Insert provenance for `from → to`, ignoring unknown sources and
    /// self-references.
    fn record(&mut self, from: &UnitName, to: &UnitName, source: &str, artifact: ArtifactName) {
        if from == to {
            return;
        }
        if let Some(targets) = self.units.get_mut(from) {
            targets.entry(to.clone()).or_default().record(source, artifact);
        }
    }
}

/// Thread-safe accumulator feeding one [`DependencyGraph`].
///
/// Candidates are resolved against the read-only index before the lock is
/// taken; the lock only guards the graph insertion of a single call.
#[derive(Debug)]
pub struct Aggregator<'a> {
    index: &'a ReverseIndex,
    graph: Mutex<DependencyGraph>,
}

impl<'a> Aggregator<'a> {
    pub fn new(inventory: &Inventory, index: &'a ReverseIndex) -> Self {
        Self {
            index,
            graph: Mutex::new(DependencyGraph::seeded(inventory)),
        }
    }

    /// Record the references found in one file owned by `owner`.
    ///
    /// Unresolved names and names owned by `owner` itself are dropped.
    /// Returns the number of references kept.
    pub fn record<'t>(
        &self,
        owner: &UnitName,
        source: &str,
        candidates: impl IntoIterator<Item = &'t str>,
    ) -> usize {
        let resolved: Vec<(&UnitName, ArtifactName)> = candidates
            .into_iter()
            .filter_map(|name| {
                let target = self.index.owner(name)?;
                (target != owner).then(|| (target, ArtifactName::new(name)))
            })
            .collect();
        if resolved.is_empty() {
            return 0;
        }

        let kept = resolved.len();
        let mut graph = self.graph.lock();
        for (target, artifact) in resolved {
            graph.record(owner, target, source, artifact);
        }
        kept
    }

    /// Finish aggregation; call only after every worker has returned.
    pub fn into_graph(self) -> DependencyGraph {
        self.graph.into_inner()
    }
}
