//! Generator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io;

/// Settings governing how targets are (re)written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Stamp managed files with an anchor footer and merge against it on
    /// regeneration. When off, existing files are never touched.
    pub use_anchor_footers: bool,
    /// Rewrite a target even when the produced content equals what is on
    /// disk.
    pub overwrite_unchanged: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            use_anchor_footers: true,
            overwrite_unchanged: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a TOML file, atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::ConfigSerialize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        io::write_text(path, &content)
    }
}
