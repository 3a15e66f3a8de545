//! Per-project manifest descriptor.
//!
//! A project may carry a `manifest.toml` anywhere inside its working copy.
//! When present, it declares which files install into which category and
//! which other projects this one depends on; every listed path resolves
//! relative to the manifest's own directory, not the repository root. This
//! lets a repository host its installable payload in a subdirectory.
//!
//! ```toml
//! [files]
//! scripts = ["automation.ash"]
//! data = ["prices.txt"]
//!
//! [[dependencies]]
//! url = "https://example.com/owner/library.git"
//! ref = "stable"
//!
//! [[dependencies]]
//! url = "https://example.com/owner/library/branches/stable"
//! vcs = "svn"
//! ```
//!
//! Absent a manifest, the conventional layout applies: every file under the
//! fixed category folders at the repository root is installable and there
//! are no dependencies. The presence question is resolved exactly once, at
//! load time, into the [`Manifest`] variant; nothing downstream branches on
//! it again.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::constants::MANIFEST_FILE;
use crate::core::SpmError;
use crate::vcs::VcsKind;

/// One dependency reference declared by a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct DependencySpec {
    /// Repository URL of the dependency.
    pub url: String,
    /// Backend to fetch it with. Defaults to git.
    #[serde(default)]
    pub vcs: VcsKind,
    /// Branch or ref to check out, when the backend supports one.
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

/// Raw on-disk shape of `manifest.toml`.
#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    files: BTreeMap<String, Vec<PathBuf>>,
    #[serde(default)]
    dependencies: Vec<DependencySpec>,
}

/// A project's installable surface, resolved once at load time.
#[derive(Debug, Clone)]
pub enum Manifest {
    /// An explicit descriptor was found.
    Explicit {
        /// Absolute directory containing the manifest; all declared paths
        /// resolve against it.
        dir: PathBuf,
        /// Category name -> ordered relative paths. Categories outside the
        /// allow-list survive parsing but are filtered by the installer.
        groups: BTreeMap<String, Vec<PathBuf>>,
        /// Declared dependencies, in manifest order.
        dependencies: Vec<DependencySpec>,
    },
    /// No descriptor: the conventional category-folder layout applies.
    Conventional,
}

impl Manifest {
    /// Load the manifest for the working copy at `project_dir`.
    ///
    /// The descriptor may live anywhere inside the working copy; when
    /// several exist the shallowest wins. A descriptor that fails to parse
    /// is an error ([`SpmError::ManifestParse`]) rather than a silent fall
    /// back to the conventional layout.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let Some(path) = find_manifest(project_dir) else {
            return Ok(Self::Conventional);
        };

        let content = std::fs::read_to_string(&path).map_err(|err| SpmError::FileSystem {
            operation: format!("read manifest ({err})"),
            path: path.display().to_string(),
        })?;
        let parsed: ManifestFile =
            toml::from_str(&content).map_err(|err| SpmError::ManifestParse {
                file: path.display().to_string(),
                reason: err.to_string(),
            })?;

        let dir = path.parent().unwrap_or(project_dir).to_path_buf();
        tracing::debug!(
            target: "manifest",
            "loaded manifest from {} ({} groups, {} dependencies)",
            path.display(),
            parsed.files.len(),
            parsed.dependencies.len()
        );

        Ok(Self::Explicit {
            dir,
            groups: parsed.files,
            dependencies: parsed.dependencies,
        })
    }

    /// Dependencies declared by this manifest, in order. Empty for the
    /// conventional layout.
    pub fn dependencies(&self) -> &[DependencySpec] {
        match self {
            Self::Explicit { dependencies, .. } => dependencies,
            Self::Conventional => &[],
        }
    }
}

/// Locate the shallowest `manifest.toml` inside `dir`, skipping the
/// version-control metadata directories.
fn find_manifest(dir: &Path) -> Option<PathBuf> {
    let mut best: Option<(usize, PathBuf)> = None;
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.file_name() != ".git" && entry.file_name() != ".svn"
        });
    for entry in walker.flatten() {
        if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE {
            let depth = entry.depth();
            match &best {
                Some((best_depth, _)) if *best_depth <= depth => {}
                _ => best = Some((depth, entry.into_path())),
            }
        }
    }
    best.map(|(_, path)| path)
}
