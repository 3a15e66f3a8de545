//! Settings for the managed root.
//!
//! Settings live in `spm.toml` at the managed root and are loaded once per
//! invocation; the values are passed explicitly into the operations that
//! need them rather than read mid-algorithm.
//!
//! ```toml
//! # Disable automatic installation of declared dependencies.
//! install-dependencies = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_FILE;
use crate::utils::fs::atomic_write;

/// User-tunable behavior flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Whether checkout and sync automatically install the dependencies a
    /// project declares. Enabled by default.
    pub install_dependencies: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_dependencies: true,
        }
    }
}

impl Settings {
    /// Load settings from `<root>/spm.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Persist settings to `<root>/spm.toml`.
    pub fn save(&self, root: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        atomic_write(&root.join(SETTINGS_FILE), content.as_bytes())
    }
}
