//! Store configuration
//!
//! Controls which records a freshly built store starts with and how the
//! binary sets up logging. Every field has a default, so an empty TOML file
//! is a valid configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::{Result, StoreError};

/// Configuration for building a blueprint store
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Load the built-in sample blueprints at construction
    pub seed_defaults: bool,

    /// Seed files or directories imported after the built-in samples
    ///
    /// Directories are walked recursively for `.toml` files.
    pub seed_paths: Vec<PathBuf>,

    /// Filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            seed_paths: Vec::new(),
            log_filter: "blueprint_store=info".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| StoreError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "log_filter must not be empty".into(),
            ));
        }

        for path in &self.seed_paths {
            if !path.exists() {
                return Err(StoreError::InvalidConfig(format!(
                    "seed path does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
