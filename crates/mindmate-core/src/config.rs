//! Engine configuration.
//!
//! All fields have defaults, so a JSON file only needs the values it
//! overrides:
//!
//! ```json
//! { "risk": { "escalation_threshold": 0.9 }, "templates": { "seeded": 7 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::RiskPolicy;
use crate::response::TemplateStrategy;

/// Default time budget for one external generator call.
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Risk assessment policy.
    pub risk: RiskPolicy,
    /// Template choice when a category has several.
    pub templates: TemplateStrategy,
    /// Time budget for the external generator, in seconds.
    pub generator_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk: RiskPolicy::default(),
            templates: TemplateStrategy::default(),
            generator_timeout_secs: DEFAULT_GENERATOR_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Loads config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parses config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the generator timeout.
    pub fn generator_timeout(&self) -> Duration {
        Duration::from_secs(self.generator_timeout_secs)
    }
}
