//! Crate-level tests over real directory trees.

mod scenario_tests;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway integration repository laid out as
/// `<unit>/<unit>Configs/src/main/synapse-config/...`.
pub(crate) struct Fixture {
    temp: TempDir,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create temp dir"),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn config_dir(&self, unit: &str) -> PathBuf {
        self.root()
            .join(unit)
            .join(format!("{unit}Configs"))
            .join("src/main/synapse-config")
    }

    /// Write a descriptor declaring `artifacts` as `(name, type)` pairs.
    pub(crate) fn unit(&self, unit: &str, artifacts: &[(&str, &str)]) -> &Self {
        let body: String = artifacts
            .iter()
            .map(|(name, kind)| {
                format!("    <artifact name=\"{name}\" version=\"1.0.0\" type=\"{kind}\"/>\n")
            })
            .collect();
        self.write(
            &self.config_dir(unit).join("artifact.xml"),
            &format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<artifacts>\n{body}</artifacts>\n"),
        )
    }

    /// Write a configuration file of `unit` at `relative` below its config dir.
    pub(crate) fn file(&self, unit: &str, relative: &str, contents: &str) -> &Self {
        self.write(&self.config_dir(unit).join(relative), contents)
    }

    pub(crate) fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> &Self {
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(path, contents).expect("write fixture file");
        self
    }
}
