//! Directory walk policy shared by the inventory and dependency scans.
//!
//! Skipped directories are pruned (never descended). Files are collected in
//! sorted order so every later phase sees a reproducible file list.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::ids::UnitName;

/// File name of the per-unit artifact descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "artifact.xml";

/// Directory segment that anchors unit attribution.
const SOURCE_DIR: &str = "src";

/// Which files a scan visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkPolicy {
    /// Directory names pruned entirely.
    pub skip_dirs: Vec<String>,
    /// File names excluded from the dependency scan.
    pub skip_files: Vec<String>,
    /// Extension (without the dot) a file needs to be scanned for references.
    pub extension: String,
}

impl Default for WalkPolicy {
    fn default() -> Self {
        Self {
            skip_dirs: vec!["target".to_string()],
            skip_files: vec!["pom.xml".to_string(), DESCRIPTOR_FILE_NAME.to_string()],
            extension: "xml".to_string(),
        }
    }
}

impl WalkPolicy {
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.skip_dirs.iter().any(|dir| entry.file_name() == OsStr::new(dir))
    }

    /// Returns true if a file takes part in the dependency scan.
    pub fn is_scannable(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if self.skip_files.iter().any(|skip| name == OsStr::new(skip)) {
            return false;
        }
        path.extension() == Some(OsStr::new(&self.extension))
    }

    /// Collect every regular file under `root` accepted by `keep`, sorted.
    fn collect(&self, root: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !self.is_pruned(e))
        {
            let entry = entry?;
            if entry.file_type().is_file() && keep(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// All unit descriptors under `root`.
    pub fn descriptor_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        self.collect(root, |path| {
            path.file_name() == Some(OsStr::new(DESCRIPTOR_FILE_NAME))
        })
    }

    /// All configuration files under `root` eligible for the dependency scan.
    pub fn config_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        self.collect(root, |path| self.is_scannable(path))
    }
}

/// How the owning unit of a descriptor file is located.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptorLayout {
    /// Same rule as configuration files: two levels above the deepest `src`.
    #[default]
    Src,
    /// Two levels above the descriptor itself (`<unit>/<project>/artifact.xml`).
    Grandparent,
}

/// Owning unit of a configuration file: the directory two levels above the
/// deepest directory named `src` on its path.
///
/// Returns `None` when no such directory exists; the file then belongs to no
/// unit.
pub fn unit_for_path(path: &Path) -> Option<UnitName> {
    let segments: Vec<&OsStr> = path
        .parent()?
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment),
            _ => None,
        })
        .collect();

    segments
        .iter()
        .enumerate()
        .rev()
        .find(|(idx, segment)| *idx >= 2 && **segment == OsStr::new(SOURCE_DIR))
        .map(|(idx, _)| UnitName::new(segments[idx - 2].to_string_lossy()))
}

/// Owning unit of a descriptor file under the given layout.
pub fn unit_for_descriptor(path: &Path, layout: DescriptorLayout) -> Option<UnitName> {
    match layout {
        DescriptorLayout::Src => unit_for_path(path),
        DescriptorLayout::Grandparent => path
            .parent()?
            .parent()?
            .file_name()
            .map(|name| UnitName::new(name.to_string_lossy())),
    }
}

/// Name a source file is recorded under in provenance: its file name without
/// the extension.
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
