//! Persisted registry of installed projects.
//!
//! The registry is the single source of truth mapping project id to
//! installation metadata. It lives at `projects.toml` under the managed root
//! and is written atomically on every mutation. Entries keep their insertion
//! order, which is the order every batch operation processes them in.
//!
//! ```toml
//! version = 1
//!
//! [[project]]
//! id = "owner-repo-main"
//! url = "https://example.com/owner/repo.git"
//! vcs = "git"
//! ref = "main"
//! path = "git/owner-repo-main"
//! files = ["scripts/1.ash", "data/1.txt"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::REGISTRY_FILE;
use crate::utils::fs::atomic_write;
use crate::vcs::VcsKind;

/// Everything the registry knows about one installed project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Derived project id, unique across the registry.
    pub id: String,
    /// Repository URL the project was checked out from.
    pub url: String,
    /// Backend the working copy belongs to.
    pub vcs: VcsKind,
    /// Branch or ref the checkout tracks, when one was requested.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Working copy location, relative to the managed root.
    pub path: PathBuf,
    /// Destination files this project installed, relative to the managed
    /// root. Only files this project actually copied are ever listed.
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    version: u32,
    #[serde(default, rename = "project")]
    projects: Vec<ProjectRecord>,
}

/// The registry itself: an insertion-ordered set of records plus its
/// on-disk location.
#[derive(Debug)]
pub struct ProjectRegistry {
    path: PathBuf,
    projects: Vec<ProjectRecord>,
}

impl ProjectRegistry {
    /// Load the registry stored under `root`, or start empty when no file
    /// exists yet.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(REGISTRY_FILE);
        let projects = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read registry: {}", path.display()))?;
            let parsed: RegistryFile = toml::from_str(&content)
                .with_context(|| format!("Invalid registry file: {}", path.display()))?;
            parsed.projects
        } else {
            Vec::new()
        };
        Ok(Self { path, projects })
    }

    /// Persist the registry atomically.
    pub fn save(&self) -> Result<()> {
        let file = RegistryFile {
            version: 1,
            projects: self.projects.clone(),
        };
        let content =
            toml::to_string_pretty(&file).context("Failed to serialize project registry")?;
        atomic_write(&self.path, content.as_bytes())
    }

    /// Ids of all registered projects, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.id.clone()).collect()
    }

    /// Iterate over records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.projects.iter()
    }

    /// Whether a project with this id is registered.
    pub fn exists(&self, id: &str) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Register a new project at the end of the order.
    pub fn insert(&mut self, record: ProjectRecord) {
        debug_assert!(!self.exists(&record.id), "duplicate project id {}", record.id);
        self.projects.push(record);
    }

    /// Remove and return a record by id.
    pub fn remove(&mut self, id: &str) -> Option<ProjectRecord> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        Some(self.projects.remove(index))
    }

    /// Extend a project's tracked file set with freshly copied files,
    /// keeping order and dropping duplicates.
    pub fn merge_files(&mut self, id: &str, copied: Vec<PathBuf>) {
        if let Some(record) = self.projects.iter_mut().find(|p| p.id == id) {
            for file in copied {
                if !record.files.contains(&file) {
                    record.files.push(file);
                }
            }
        }
    }

    /// Number of registered projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the registry has no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
