//! Path hygiene checks for manifest-declared file paths.

use std::path::{Component, Path};

use anyhow::{Result, anyhow};

/// Reject paths that could escape their containing directory: parent-dir
/// components, absolute paths, and Windows drive prefixes.
pub fn validate_no_traversal(path: &Path) -> Result<()> {
    for component in path.components() {
        match component {
            Component::ParentDir => {
                return Err(anyhow!(
                    "Path contains parent directory reference (..): {}",
                    path.display()
                ));
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(anyhow!("Path must be relative: {}", path.display()));
            }
            _ => {}
        }
    }
    Ok(())
}
