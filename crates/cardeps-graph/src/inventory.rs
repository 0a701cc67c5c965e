//! Unit inventory: which artifacts every unit declares.
//!
//! Built once per run from every `artifact.xml` descriptor in the tree and
//! read-only afterwards. Artifact lists from several descriptors of the same
//! unit are concatenated in descriptor path order; duplicates are kept.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::ThreadPool;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::extract::parse_document;
use crate::ids::{ArtifactName, UnitName};
use crate::walk::{DescriptorLayout, WalkPolicy, unit_for_descriptor};

/// Optional backing file of a declared artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// One `<artifact>` entry of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredArtifact {
    pub name: ArtifactName,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ArtifactItem>,
}

impl DeclaredArtifact {
    pub fn new(name: impl Into<ArtifactName>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            item: None,
        }
    }
}

/// Mapping of unit → declared artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    units: BTreeMap<UnitName, Vec<DeclaredArtifact>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `unit` declares `artifact`.
    pub fn declare(&mut self, unit: UnitName, artifact: DeclaredArtifact) {
        self.units.entry(unit).or_default().push(artifact);
    }

    /// Register a unit even if it declares nothing.
    pub fn add_unit(&mut self, unit: UnitName) {
        self.units.entry(unit).or_default();
    }

    /// Units in lexical order.
    pub fn units(&self) -> impl Iterator<Item = &UnitName> {
        self.units.keys()
    }

    pub fn contains_unit(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Artifact names declared by `unit`, duplicates included.
    pub fn artifacts<'a>(
        &'a self,
        unit: &str,
    ) -> impl Iterator<Item = &'a ArtifactName> + use<'a> {
        self.declarations(unit).iter().map(|artifact| &artifact.name)
    }

    /// Full declarations of `unit`, empty when the unit is unknown.
    pub fn declarations(&self, unit: &str) -> &[DeclaredArtifact] {
        self.units.get(unit).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&UnitName, &[DeclaredArtifact])> {
        self.units.iter().map(|(unit, arts)| (unit, arts.as_slice()))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<(UnitName, DeclaredArtifact)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (UnitName, DeclaredArtifact)>>(iter: I) -> Self {
        let mut inventory = Self::new();
        for (unit, artifact) in iter {
            inventory.declare(unit, artifact);
        }
        inventory
    }
}

/// Parse the artifact list of one descriptor document.
///
/// Every `artifact` child of the root element must carry a `name` attribute;
/// an empty name is skipped since it could never be referenced.
pub fn parse_descriptor(path: &Path, text: &str) -> Result<Vec<DeclaredArtifact>> {
    let doc = parse_document(path, text)?;

    let mut artifacts = Vec::new();
    for node in doc
        .root_element()
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "artifact")
    {
        let Some(name) = node.attribute("name") else {
            return Err(Error::InvalidDescriptor {
                path: path.to_path_buf(),
                reason: format!(
                    "artifact element at byte {} has no name attribute",
                    node.range().start
                ),
            });
        };
        if name.is_empty() {
            warn!(descriptor = %path.display(), "skipping artifact with an empty name");
            continue;
        }

        let item = node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "item")
            .map(|item| ArtifactItem {
                file: child_text(item, "file"),
                path: child_text(item, "path"),
            });

        artifacts.push(DeclaredArtifact {
            name: ArtifactName::new(name),
            kind: node.attribute("type").unwrap_or_default().to_string(),
            item,
        });
    }
    Ok(artifacts)
}

fn child_text(node: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
        .and_then(|n| n.text())
        .map(|text| text.trim().to_string())
}

fn read_descriptor(path: &Path) -> Result<Vec<DeclaredArtifact>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_descriptor(path, &text)
}

/// Build the inventory of every unit under `root`.
///
/// Descriptors are parsed on `pool`; the first unreadable or malformed
/// descriptor aborts the build, since a partial inventory would silently
/// under-report dependencies.
pub fn build_inventory(
    root: &Path,
    policy: &WalkPolicy,
    layout: DescriptorLayout,
    pool: &ThreadPool,
) -> Result<Inventory> {
    let descriptors = policy.descriptor_files(root)?;
    debug!(count = descriptors.len(), "found artifact descriptors");

    let attributed: Vec<(UnitName, PathBuf)> = descriptors
        .into_iter()
        .filter_map(|path| match unit_for_descriptor(&path, layout) {
            Some(unit) => Some((unit, path)),
            None => {
                debug!(descriptor = %path.display(), "descriptor outside any unit, skipping");
                None
            }
        })
        .collect();

    let parsed: Vec<(UnitName, Vec<DeclaredArtifact>)> = pool.install(|| {
        attributed
            .into_par_iter()
            .map(|(unit, path)| read_descriptor(&path).map(|artifacts| (unit, artifacts)))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut inventory = Inventory::new();
    for (unit, artifacts) in parsed {
        inventory.add_unit(unit.clone());
        for artifact in artifacts {
            inventory.declare(unit.clone(), artifact);
        }
    }

    info!(
        units = inventory.unit_count(),
        artifacts = inventory.artifact_count(),
        "analysed artifact descriptors"
    );
    Ok(inventory)
}
