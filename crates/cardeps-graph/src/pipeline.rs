//! End-to-end analysis of one tree.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::DependencyGraph;
use crate::error::Result;
use crate::extract::PropertyCapture;
use crate::index::{Collision, CollisionPolicy, ReverseIndex};
use crate::inventory::{Inventory, build_inventory};
use crate::reconcile::{Overlay, reconcile};
use crate::scan::{ScanSummary, Scanner, Strategy, worker_pool};
use crate::walk::{DescriptorLayout, WalkPolicy};

/// Run parameters for [`analyze`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeOptions {
    pub policy: WalkPolicy,
    pub layout: DescriptorLayout,
    pub collisions: CollisionPolicy,
    pub capture: PropertyCapture,
    pub strategy: Strategy,
    /// Worker threads; `None` uses the available parallelism.
    pub workers: Option<usize>,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub inventory: Inventory,
    pub collisions: Vec<Collision>,
    pub regex: Option<DependencyGraph>,
    pub structural: Option<DependencyGraph>,
    /// Present only when both strategies ran.
    pub overlay: Option<Overlay>,
    pub summary: ScanSummary,
}

impl Analysis {
    /// Graph of the preferred strategy: structural when it ran, regex otherwise.
    pub fn primary_graph(&self) -> Option<&DependencyGraph> {
        self.structural.as_ref().or(self.regex.as_ref())
    }
}

/// Build the inventory of `root`, then scan it with the selected strategies.
///
/// The inventory phase completes before the dependency scan begins; both run
/// on the same bounded worker pool.
pub fn analyze(root: &Path, options: &AnalyzeOptions) -> Result<Analysis> {
    let pool = worker_pool(options.workers)?;
    info!(
        root = %root.display(),
        workers = pool.current_num_threads(),
        strategy = %options.strategy,
        "starting analysis"
    );

    let inventory = build_inventory(root, &options.policy, options.layout, &pool)?;
    let index = ReverseIndex::build(&inventory, options.collisions)?;

    let output = Scanner::new(&inventory, &index, &options.policy)
        .strategy(options.strategy)
        .property_capture(options.capture)
        .scan(root, &pool)?;

    let overlay = match (&output.regex, &output.structural) {
        (Some(regex), Some(structural)) => Some(reconcile(regex, structural)),
        _ => None,
    };

    Ok(Analysis {
        collisions: index.collisions().to_vec(),
        inventory,
        regex: output.regex,
        structural: output.structural,
        overlay,
        summary: output.summary,
    })
}
