use cardeps_graph::UnitFilter;

use crate::config::CardepsConfig;
use crate::error::{ConfigError, Result};

impl CardepsConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "workers".to_string(),
                value: "0".to_string(),
                hint: "Use at least one worker thread, or leave it unset to match the CPU count"
                    .to_string(),
            }
            .into());
        }

        if self.formats.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "formats".to_string(),
                value: "[]".to_string(),
                hint: "Choose at least one of dot, text, json".to_string(),
            }
            .into());
        }

        if let Some(pattern) = &self.exclude {
            if let Err(err) = UnitFilter::new(Vec::<String>::new(), Some(pattern)) {
                return Err(ConfigError::InvalidValue {
                    field: "exclude".to_string(),
                    value: pattern.clone(),
                    hint: err.to_string(),
                }
                .into());
            }
        }

        if !self.root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: self.root.display().to_string(),
                hint: "Point cardeps at an existing project directory".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
