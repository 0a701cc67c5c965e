//! # cardeps-graph
//!
//! Inter-unit dependency analysis for integration projects made of
//! independently deployable units ("cars").
//!
//! Every unit declares the artifacts it owns in an `artifact.xml` descriptor.
//! A configuration file of one unit that references an artifact owned by
//! another unit is a dependency between the two. This crate finds those
//! dependencies with two independent strategies and records which file
//! referenced which artifact.
//!
//! ## Architecture
//!
//! ```text
//!   artifact.xml files ──► Inventory ──► ReverseIndex ──► ReferenceMatcher
//!                                            │                  │
//!   configuration files ─────────────────────┼──► structural ───┤
//!                                            ▼      extractor   ▼
//!                                        Aggregator ◄── regex strategy
//!                                            │
//!                                            ▼
//!                              DependencyGraph (per strategy)
//!                                            │
//!                                            ▼
//!                                   Overlay (reconcile)
//! ```
//!
//! The inventory is complete before the dependency scan starts. Both phases
//! run on one bounded rayon pool; a failure in any file aborts the run.
//! Presentation is left to callers, which narrow graphs with a
//! [`UnitFilter`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardeps_graph::{AnalyzeOptions, Strategy, UnitFilter, analyze};
//! use std::path::Path;
//!
//! # fn main() -> cardeps_graph::Result<()> {
//! let options = AnalyzeOptions {
//!     strategy: Strategy::Structural,
//!     ..AnalyzeOptions::default()
//! };
//! let analysis = analyze(Path::new("integration-repo"), &options)?;
//! let filter = UnitFilter::new(Vec::<String>::new(), Some("Test$"))?;
//!
//! if let Some(graph) = analysis.primary_graph() {
//!     for (from, to, edge) in graph.edges() {
//!         if filter.allows_edge(from.as_str(), to.as_str()) {
//!             println!("{from} -> {to} ({} references)", edge.reference_count());
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod filter;
pub mod ids;
pub mod index;
pub mod inventory;
pub mod pipeline;
pub mod reconcile;
pub mod scan;
pub mod walk;

pub use aggregate::{Aggregator, DependencyEdge, DependencyGraph};
pub use error::{Error, Result};
pub use extract::{
    DocumentShape, MediationKind, PropertyCapture, extract_references, parse_document,
};
pub use filter::UnitFilter;
pub use ids::{ArtifactName, UnitName};
pub use index::{Collision, CollisionPolicy, ReferenceMatcher, ReverseIndex};
pub use inventory::{
    ArtifactItem, DeclaredArtifact, Inventory, build_inventory, parse_descriptor,
};
pub use pipeline::{Analysis, AnalyzeOptions, analyze};
pub use reconcile::{EdgeOrigin, Overlay, reconcile};
pub use scan::{ScanOutput, ScanSummary, Scanner, Strategy, worker_pool};
pub use walk::{
    DESCRIPTOR_FILE_NAME, DescriptorLayout, WalkPolicy, source_name, unit_for_descriptor,
    unit_for_path,
};

#[cfg(test)]
mod tests;
