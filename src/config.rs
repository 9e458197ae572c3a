use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{InspectError, Result};
use crate::pretty::DEFAULT_WIDTH;

/// What to print for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    /// Tensor table slots printed between the inputs and outputs
    pub tensor_indices: Vec<usize>,
    pub show_counts: bool,
    pub show_tensors: bool,
    pub show_ops: bool,
    /// Line width for the pretty printer
    pub width: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            tensor_indices: vec![0, 10],
            show_counts: false,
            show_tensors: false,
            show_ops: false,
            width: DEFAULT_WIDTH,
        }
    }
}

impl InspectConfig {
    pub const PATH: &'static str = "model-peek.json";

    /// Read a config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| InspectError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config: an explicit path must load, the default file is
    /// optional and falls back to defaults when it does not parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            tracing::info!(path = %path.display(), "loaded configuration");
            return Ok(config);
        }

        let path = Path::new(Self::PATH);
        if !path.exists() {
            tracing::debug!("no {} found, using defaults", Self::PATH);
            return Ok(Self::default());
        }

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("Error parsing config: {}. Using defaults.", e);
                Ok(Self::default())
            }
        }
    }
}
