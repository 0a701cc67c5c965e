//! Concurrent dependency scan over every configuration file of the tree.
//!
//! Files are enumerated once, then processed on a bounded rayon pool. Each
//! file is read once and fed to whichever strategies are enabled, each
//! writing to its own [`Aggregator`]. The pool's `install` call is the
//! completion barrier: graphs are only taken out of the aggregators after it
//! returns, and the first failing file aborts the whole scan.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{Aggregator, DependencyGraph};
use crate::error::{Error, Result};
use crate::extract::{DocumentShape, PropertyCapture, extract_references, parse_document};
use crate::ids::UnitName;
use crate::index::{ReferenceMatcher, ReverseIndex};
use crate::inventory::Inventory;
use crate::walk::{WalkPolicy, source_name, unit_for_path};

/// Which extraction strategies a scan runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Raw-text alternation matching only.
    Regex,
    /// Structural extraction only.
    Structural,
    /// Both, followed by reconciliation.
    #[default]
    Both,
}

impl Strategy {
    pub fn runs_regex(self) -> bool {
        matches!(self, Self::Regex | Self::Both)
    }

    pub fn runs_structural(self) -> bool {
        matches!(self, Self::Structural | Self::Both)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regex => "regex",
            Self::Structural => "structural",
            Self::Both => "both",
        })
    }
}

/// Build the bounded worker pool shared by both scan phases.
///
/// `None` sizes the pool to the available parallelism.
pub fn worker_pool(workers: Option<usize>) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("cardeps-worker-{i}"));
    if let Some(workers) = workers {
        builder = builder.num_threads(workers);
    }
    Ok(builder.build()?)
}

/// Per-scan counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Files read and fed to at least one strategy.
    pub files_scanned: usize,
    /// Files with no owning unit, or owned by a unit without a descriptor.
    pub files_unattributable: usize,
    /// Resolved references recorded by the regex strategy.
    pub regex_references: usize,
    /// Resolved references recorded by the structural strategy.
    pub structural_references: usize,
    /// Root tags the structural extractor does not recognize, with counts.
    pub unrecognized: BTreeMap<String, usize>,
}

impl ScanSummary {
    fn unattributable() -> Self {
        Self {
            files_unattributable: 1,
            ..Self::default()
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.files_scanned += other.files_scanned;
        self.files_unattributable += other.files_unattributable;
        self.regex_references += other.regex_references;
        self.structural_references += other.structural_references;
        for (tag, count) in other.unrecognized {
            *self.unrecognized.entry(tag).or_default() += count;
        }
        self
    }
}

/// Result of one scan: a graph per executed strategy.
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub regex: Option<DependencyGraph>,
    pub structural: Option<DependencyGraph>,
    pub summary: ScanSummary,
}

/// Dependency scanner bound to a finished inventory and reverse index.
pub struct Scanner<'a> {
    inventory: &'a Inventory,
    index: &'a ReverseIndex,
    policy: &'a WalkPolicy,
    strategy: Strategy,
    capture: PropertyCapture,
}

impl<'a> Scanner<'a> {
    pub fn new(inventory: &'a Inventory, index: &'a ReverseIndex, policy: &'a WalkPolicy) -> Self {
        Self {
            inventory,
            index,
            policy,
            strategy: Strategy::default(),
            capture: PropertyCapture::default(),
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn property_capture(mut self, capture: PropertyCapture) -> Self {
        self.capture = capture;
        self
    }

    /// Scan every eligible file under `root` on `pool`.
    pub fn scan(&self, root: &Path, pool: &ThreadPool) -> Result<ScanOutput> {
        let files = self.policy.config_files(root)?;
        debug!(count = files.len(), strategy = %self.strategy, "starting dependency scan");

        let matcher = if self.strategy.runs_regex() {
            let matcher = ReferenceMatcher::from_index(self.index)?;
            debug!(alternatives = matcher.alternatives(), "compiled reference matcher");
            Some(matcher)
        } else {
            None
        };

        let regex = matcher
            .as_ref()
            .map(|matcher| (matcher, Aggregator::new(self.inventory, self.index)));
        let structural = self
            .strategy
            .runs_structural()
            .then(|| Aggregator::new(self.inventory, self.index));

        let sinks = Sinks {
            regex: regex.as_ref().map(|(matcher, agg)| (*matcher, agg)),
            structural: structural.as_ref(),
        };
        let summary = pool.install(|| {
            files
                .par_iter()
                .map(|path| self.scan_file(path, &sinks))
                .try_reduce(ScanSummary::default, |a, b| Ok(a.merge(b)))
        })?;

        let output = ScanOutput {
            regex: regex.map(|(_, agg)| agg.into_graph()),
            structural: structural.map(Aggregator::into_graph),
            summary,
        };
        info!(
            files = output.summary.files_scanned,
            unattributable = output.summary.files_unattributable,
            regex_edges = output.regex.as_ref().map(DependencyGraph::edge_count),
            structural_edges = output.structural.as_ref().map(DependencyGraph::edge_count),
            "dependency scan complete"
        );
        Ok(output)
    }

    fn owner_of(&self, path: &Path) -> Option<UnitName> {
        unit_for_path(path).filter(|unit| self.inventory.contains_unit(unit.as_str()))
    }

    fn scan_file(&self, path: &Path, sinks: &Sinks<'_, '_>) -> Result<ScanSummary> {
        let Some(owner) = self.owner_of(path) else {
            debug!(file = %path.display(), "file belongs to no known unit, skipping");
            return Ok(ScanSummary::unattributable());
        };

        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let source = source_name(path);
        let mut summary = ScanSummary {
            files_scanned: 1,
            ..ScanSummary::default()
        };

        if let Some((matcher, aggregator)) = sinks.regex {
            // Undecodable bytes are replaced; artifact names are always UTF-8.
            let text = String::from_utf8_lossy(&bytes);
            summary.regex_references = aggregator.record(&owner, &source, matcher.find_all(&text));
        }

        if let Some(aggregator) = sinks.structural {
            let text = std::str::from_utf8(&bytes).map_err(|source| Error::NotUtf8 {
                path: path.to_path_buf(),
                source,
            })?;
            let doc = parse_document(path, text)?;
            let (shape, found) = extract_references(&doc, self.capture);
            if let DocumentShape::Unrecognized(tag) = shape {
                debug!(file = %path.display(), tag = tag.as_str(), "unrecognized root element");
                summary.unrecognized.insert(tag, 1);
            }
            summary.structural_references =
                aggregator.record(&owner, &source, found.iter().map(String::as_str));
        }

        Ok(summary)
    }
}

/// Aggregators shared by every worker of one scan.
struct Sinks<'m, 'a> {
    regex: Option<(&'m ReferenceMatcher, &'m Aggregator<'a>)>,
    structural: Option<&'m Aggregator<'a>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_selection() {
        assert!(Strategy::Both.runs_regex() && Strategy::Both.runs_structural());
        assert!(!Strategy::Regex.runs_structural());
        assert!(!Strategy::Structural.runs_regex());
        assert_eq!(Strategy::Structural.to_string(), "structural");
    }

    #[test]
    fn test_summary_merge() {
        let mut a = ScanSummary::unattributable();
        a.unrecognized.insert("endpoint".to_string(), 1);
        let mut b = ScanSummary {
            files_scanned: 2,
            regex_references: 3,
            ..ScanSummary::default()
        };
        b.unrecognized.insert("endpoint".to_string(), 2);
        b.unrecognized.insert("localEntry".to_string(), 1);

        let merged = a.merge(b);
        assert_eq!(merged.files_scanned, 2);
        assert_eq!(merged.files_unattributable, 1);
        assert_eq!(merged.regex_references, 3);
        assert_eq!(merged.unrecognized["endpoint"], 3);
        assert_eq!(merged.unrecognized["localEntry"], 1);
    }

    #[test]
    fn test_worker_pool_size() {
        let pool = worker_pool(Some(3)).unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
