use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::Serialize;

use cardeps_graph::{CollisionPolicy, DescriptorLayout, PropertyCapture, Strategy};

use crate::cli::{AnalyzeArgs, InventoryArgs, OutputFormat, WalkArgs};
use crate::config::CardepsConfig;
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "cardeps.toml";

/// Prefix of configuration environment variables (`CARDEPS_OUT_DIR`, ...).
pub const ENV_PREFIX: &str = "CARDEPS_";

/// Values given explicitly on the command line; unset flags leave lower
/// layers untouched.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<Strategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formats: Option<Vec<OutputFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    collisions: Option<CollisionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    property_capture: Option<PropertyCapture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor_layout: Option<DescriptorLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_dirs: Option<Vec<String>>,
}

fn non_empty<T>(values: &[T]) -> Option<Vec<T>>
where
    T: Clone,
{
    (!values.is_empty()).then(|| values.to_vec())
}

impl From<&WalkArgs> for CliOverrides {
    fn from(args: &WalkArgs) -> Self {
        Self {
            root: args.root.clone(),
            workers: args.workers,
            descriptor_layout: args.descriptor_layout.map(Into::into),
            skip_dirs: non_empty(&args.skip_dirs),
            ..Self::default()
        }
    }
}

impl From<&AnalyzeArgs> for CliOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            out_dir: args.out_dir.clone(),
            units: non_empty(&args.units),
            exclude: args.exclude.clone(),
            strategy: args.strategy.map(Into::into),
            formats: non_empty(&args.formats),
            collisions: args.collisions.map(Into::into),
            property_capture: args.property_capture.map(Into::into),
            ..Self::from(&args.walk)
        }
    }
}

impl From<&InventoryArgs> for CliOverrides {
    fn from(args: &InventoryArgs) -> Self {
        Self::from(&args.walk)
    }
}

/// `out_dir` → `outDir`, matching the camelCase configuration keys.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            field.extend(c.to_uppercase());
            upper = false;
        } else {
            field.extend(c.to_lowercase());
        }
    }
    field
}

impl CardepsConfig {
    /// Load configuration for `cardeps analyze`.
    pub fn load_for_analyze(args: &AnalyzeArgs) -> Result<Self> {
        Self::load(args.walk.config.as_deref(), CliOverrides::from(args))
    }

    /// Load configuration for `cardeps inventory`.
    pub fn load_for_inventory(args: &InventoryArgs) -> Result<Self> {
        Self::load(args.walk.config.as_deref(), CliOverrides::from(args))
    }

    /// Merge defaults, the config file, the environment and `overrides`.
    pub(crate) fn load(config_path: Option<&Path>, overrides: CliOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                default_path.is_file().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            figment = if path.extension().is_some_and(|ext| ext == "json") {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["config"])
                .map(|key| env_key_to_field(key.as_str()).into()),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)).into())
    }
}
