//! Run configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a normalization run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct NormalizeConfig {
    /// Root directory whose files are reset.
    pub root: PathBuf,

    /// Record unreadable subdirectories and keep walking instead of
    /// aborting the run. An unreadable root always aborts.
    #[builder(default = "false")]
    #[serde(default)]
    pub skip_unreadable_dirs: bool,
}

impl NormalizeConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl NormalizeConfig {
    /// Create a new config builder.
    pub fn builder() -> NormalizeConfigBuilder {
        NormalizeConfigBuilder::default()
    }

    /// Create a config for a root with default settings.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            skip_unreadable_dirs: false,
        }
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = NormalizeConfig::builder()
            .root("/work/solution")
            .skip_unreadable_dirs(true)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/work/solution"));
        assert!(config.skip_unreadable_dirs);
    }

    #[test]
    fn test_config_builder_requires_root() {
        let err = NormalizeConfig::builder().build().unwrap_err();
        assert!(err.to_string().contains("Root path is required"));

        let err = NormalizeConfig::builder().root("").build().unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_config_simple() {
        let config = NormalizeConfig::new("/work");
        assert_eq!(config.root, PathBuf::from("/work"));
        assert!(!config.skip_unreadable_dirs);
    }
}
