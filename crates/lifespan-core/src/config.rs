//! YAML configuration.
//!
//! Format:
//! ```yaml
//! default_scope: pair
//! connection_kinds:
//!   employment: subject
//!   residence: subject
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constraint::ConstraintTable;
use crate::error::LifespanError;

/// Default configuration file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "lifespan.yaml";

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub constraints: ConstraintTable,
}

impl Config {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`LifespanError::Serialization`] if the YAML is malformed or
    /// names an unknown scope.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LifespanError> {
        serde_yaml::from_str(yaml).map_err(|e| LifespanError::Serialization(e.to_string()))
    }

    /// Read configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`LifespanError::Io`] if the file cannot be read, or
    /// [`LifespanError::Serialization`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, LifespanError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            kinds = config.constraints.connection_kinds.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Load `path` if given, otherwise [`CONFIG_FILE_NAME`] from `dir` if it
    /// exists, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LifespanError::Config`] if an explicitly given file does not
    /// exist, and propagates read and parse failures.
    pub fn resolve(path: Option<&Path>, dir: &Path) -> Result<Self, LifespanError> {
        match path {
            Some(path) if !path.exists() => Err(LifespanError::Config(format!(
                "config file not found: {}",
                path.display()
            ))),
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if candidate.exists() {
                    Self::load(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
