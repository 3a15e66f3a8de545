//! Copies a project's installable files into the managed destination roots.
//!
//! The installer is the hygiene boundary between a cloned working copy and
//! the script-execution sandboxes: only the allow-listed categories
//! (`scripts`, `relay`, `data`) ever reach a destination root, and declared
//! paths are validated so nothing escapes the root. Installation is
//! idempotent - a file already present at its destination is left exactly as
//! it is, whether it was put there by an earlier install of this project or
//! by somebody else.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::constants::PERMISSIBLE_CATEGORIES;
use crate::core::SpmError;
use crate::manifest::Manifest;
use crate::utils::fs as fsutil;
use crate::utils::paths::validate_no_traversal;

/// One file to install: an absolute source inside the working copy and a
/// destination path relative to the managed root.
#[derive(Debug, Clone)]
pub struct InstallEntry {
    /// Absolute path of the file inside the working copy.
    pub source: PathBuf,
    /// Destination path relative to the managed root, starting with the
    /// category folder.
    pub dest: PathBuf,
}

/// Build the install plan for a working copy.
///
/// For an explicit manifest, each declared path resolves against the
/// manifest's directory and lands under its category's destination root.
/// Categories outside the allow-list are dropped here, and a declared file
/// that does not exist in the working copy is reported and skipped rather
/// than failing the whole install. For the conventional layout, every file
/// under the fixed category folders is planned with its relative path
/// preserved.
pub fn plan(project_dir: &Path, manifest: &Manifest) -> Result<Vec<InstallEntry>> {
    let mut entries = Vec::new();

    match manifest {
        Manifest::Explicit { dir, groups, .. } => {
            for (category, paths) in groups {
                if !PERMISSIBLE_CATEGORIES.contains(&category.as_str()) {
                    tracing::warn!(
                        target: "installer",
                        "ignoring files declared under unpermitted category '{category}'"
                    );
                    continue;
                }
                for rel in paths {
                    validate_no_traversal(rel)?;
                    let source = dir.join(rel);
                    if !source.is_file() {
                        tracing::warn!(
                            target: "installer",
                            "manifest declares {} but it is missing from the working copy",
                            source.display()
                        );
                        continue;
                    }
                    entries.push(InstallEntry {
                        source,
                        dest: Path::new(category).join(rel),
                    });
                }
            }
        }
        Manifest::Conventional => {
            for category in PERMISSIBLE_CATEGORIES {
                let base = project_dir.join(category);
                if !base.is_dir() {
                    continue;
                }
                for entry in WalkDir::new(&base).sort_by_file_name().into_iter().flatten() {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let Ok(rel) = entry.path().strip_prefix(&base).map(Path::to_path_buf) else {
                        continue;
                    };
                    entries.push(InstallEntry {
                        source: entry.into_path(),
                        dest: Path::new(category).join(rel),
                    });
                }
            }
        }
    }

    Ok(entries)
}

/// Copy every planned file that is not already present at its destination.
///
/// Returns the destination paths (relative to `root`) this invocation
/// actually copied - the caller tracks only those as installed by the
/// project, so a later uninstall never touches files owned elsewhere.
pub fn install(root: &Path, plan: &[InstallEntry]) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for entry in plan {
        let dest = root.join(&entry.dest);
        if dest.exists() {
            tracing::trace!(target: "installer", "{} already present, skipping", entry.dest.display());
            continue;
        }
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|err| SpmError::FileSystem {
                operation: format!("create directory ({err})"),
                path: parent.display().to_string(),
            })?;
        }
        std::fs::copy(&entry.source, &dest).map_err(|err| SpmError::FileSystem {
            operation: format!("copy ({err})"),
            path: dest.display().to_string(),
        })?;
        tracing::debug!(target: "installer", "installed {}", entry.dest.display());
        copied.push(entry.dest.clone());
    }
    Ok(copied)
}

/// Remove exactly the given installed files (paths relative to `root`).
/// Files already gone are fine; unrelated files are never touched.
pub fn uninstall(root: &Path, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let path = root.join(file);
        fsutil::remove_file_if_exists(&path).map_err(|err| SpmError::FileSystem {
            operation: format!("remove ({err})"),
            path: path.display().to_string(),
        })?;
        tracing::debug!(target: "installer", "removed {}", file.display());
    }
    Ok(())
}
