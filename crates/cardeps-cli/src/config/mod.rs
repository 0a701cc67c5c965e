//! Layered configuration for cardeps commands.
//!
//! Priority: CLI > environment (`CARDEPS_*`) > config file > defaults.
//!
//! Environment keys are the snake-cased config keys (`CARDEPS_OUT_DIR`,
//! `CARDEPS_PROPERTY_CAPTURE`). List keys (`units`, `formats`, `skipDirs`,
//! `skipFiles`) also accept one comma separated string, in the environment
//! as well as in config files.

mod conversions;
mod defaults;
mod lists;
mod loading;
mod validation;

use std::path::PathBuf;

use cardeps_graph::{
    AnalyzeOptions, CollisionPolicy, DescriptorLayout, PropertyCapture, Strategy, UnitFilter,
    WalkPolicy,
};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::Result;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};

/// Cardeps configuration, loaded from cardeps.toml, the environment and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardepsConfig {
    /// Project root to scan
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory output files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Units to show; empty shows all units not excluded
    #[serde(default, deserialize_with = "lists::comma_list")]
    pub units: Vec<String>,

    /// Regular expression of units to hide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(default)]
    pub strategy: Strategy,

    #[serde(default = "default_formats", deserialize_with = "lists::comma_list")]
    pub formats: Vec<OutputFormat>,

    /// Worker threads; unset uses the available parallelism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    #[serde(default)]
    pub collisions: CollisionPolicy,

    #[serde(default)]
    pub property_capture: PropertyCapture,

    #[serde(default)]
    pub descriptor_layout: DescriptorLayout,

    #[serde(default = "default_skip_dirs", deserialize_with = "lists::comma_list")]
    pub skip_dirs: Vec<String>,

    #[serde(default = "default_skip_files", deserialize_with = "lists::comma_list")]
    pub skip_files: Vec<String>,
}

impl Default for CardepsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            out_dir: default_out_dir(),
            units: Vec::new(),
            exclude: None,
            strategy: Strategy::default(),
            formats: default_formats(),
            workers: None,
            collisions: CollisionPolicy::default(),
            property_capture: PropertyCapture::default(),
            descriptor_layout: DescriptorLayout::default(),
            skip_dirs: default_skip_dirs(),
            skip_files: default_skip_files(),
        }
    }
}

impl CardepsConfig {
    pub fn walk_policy(&self) -> WalkPolicy {
        WalkPolicy {
            skip_dirs: self.skip_dirs.clone(),
            skip_files: self.skip_files.clone(),
            ..WalkPolicy::default()
        }
    }

    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            policy: self.walk_policy(),
            layout: self.descriptor_layout,
            collisions: self.collisions,
            capture: self.property_capture,
            strategy: self.strategy,
            workers: self.workers,
        }
    }

    /// Output-time unit predicate.
    pub fn unit_filter(&self) -> Result<UnitFilter> {
        Ok(UnitFilter::new(self.units.iter().cloned(), self.exclude.as_deref())?)
    }
}
