//! Configuration for the search pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlaiveError, Result};
use crate::modifier::ModifierConfig;

/// Configuration for [`crate::search::SearchEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of hits returned when a query sets no limit.
    pub default_limit: usize,
    /// Largest limit a query may ask for.
    pub max_limit: usize,
    /// Hit count from which rescoring fans out over the rayon pool.
    pub parallel_threshold: usize,
    /// Score modifier validation settings.
    pub modifier: ModifierConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 1000,
            parallel_threshold: 256,
            modifier: ModifierConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply the default limit and check it against `max_limit`.
    pub fn resolve_limit(&self, requested: Option<usize>) -> Result<usize> {
        let limit = requested.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            return Err(GlaiveError::invalid_argument(format!(
                "limit must be within 1..={}, got {limit}",
                self.max_limit
            )));
        }
        Ok(limit)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_limit == 0 {
            return Err(GlaiveError::invalid_config("max_limit must be > 0"));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(GlaiveError::invalid_config(format!(
                "default_limit must be within 1..={}, got {}",
                self.max_limit, self.default_limit
            )));
        }
        self.modifier.validate()
    }
}
