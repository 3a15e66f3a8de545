//! Orchestrates checkout, update, sync, and delete over the registry.
//!
//! [`ScriptManager`] owns the managed root, the persisted
//! [`ProjectRegistry`], and the [`Settings`] for one invocation. All
//! operations run to completion on the calling task; batch operations
//! (update-all, sync) process projects sequentially in registration order
//! and treat per-project failures as reported, non-fatal events.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::config::Settings;
use crate::core::SpmError;
use crate::installer;
use crate::manifest::Manifest;
use crate::registry::{ProjectRecord, ProjectRegistry};
use crate::resolver;
use crate::utils::fs as fsutil;
use crate::vcs::{self, VcsKind};

/// Outcome of a batch operation: how many projects succeeded and which
/// failed. Failures have already been reported to the user when the report
/// is returned.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Projects processed without error.
    pub succeeded: usize,
    /// `(project id, error)` pairs for projects that failed.
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    fn record_failure(&mut self, id: &str, err: &anyhow::Error) {
        tracing::error!(target: "manager", "{id}: {err:#}");
        eprintln!("{}", format!("{id}: {err:#}").red());
        self.failures.push((id.to_string(), format!("{err:#}")));
    }

    /// Whether every project was processed cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The command-facing entry point for all project operations.
pub struct ScriptManager {
    root: PathBuf,
    registry: ProjectRegistry,
    settings: Settings,
}

impl ScriptManager {
    /// Open the managed root, loading the registry and settings stored
    /// there. The root is created if it does not exist yet.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fsutil::ensure_dir(&root)?;
        let registry = ProjectRegistry::load(&root)?;
        let settings = Settings::load(&root)?;
        Ok(Self {
            root,
            registry,
            settings,
        })
    }

    /// The managed root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &ProjectRegistry {
        &self.registry
    }

    /// The settings loaded from the managed root.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check out a project and install its files, then resolve the
    /// dependencies its manifest declares (when enabled by settings).
    ///
    /// Returns the derived project id. Fails with
    /// [`SpmError::AlreadyInstalled`] when the id is registered already - a
    /// reported no-op for the command layer.
    pub async fn checkout(
        &mut self,
        url: &str,
        reference: Option<&str>,
        kind: VcsKind,
    ) -> Result<String> {
        let id = vcs::project_id(url, reference);
        let manifest = self.install_project(url, reference, kind, &id).await?;

        let dependencies = manifest.dependencies().to_vec();
        let enabled = self.settings.install_dependencies;
        let mut in_flight = vec![id.clone()];
        resolver::resolve(self, dependencies, enabled, &mut in_flight).await?;
        Ok(id)
    }

    /// Clone, register, and install one project. Shared by [`checkout`]
    /// and by dependency resolution; does not recurse into dependencies
    /// itself.
    ///
    /// [`checkout`]: Self::checkout
    pub(crate) async fn install_project(
        &mut self,
        url: &str,
        reference: Option<&str>,
        kind: VcsKind,
        id: &str,
    ) -> Result<Manifest> {
        if self.registry.exists(id) {
            return Err(SpmError::AlreadyInstalled { id: id.to_string() }.into());
        }

        let rel_path = PathBuf::from(kind.dir_name()).join(id);
        let dest = self.root.join(&rel_path);
        // A leftover working copy without a registry entry is stale state
        // from an interrupted run; clear it so the clone lands clean.
        fsutil::remove_dir_if_exists(&dest).map_err(|err| SpmError::FileSystem {
            operation: format!("clear stale working copy ({err})"),
            path: dest.display().to_string(),
        })?;

        vcs::clone(kind, url, reference, &dest).await?;
        self.registry.insert(ProjectRecord {
            id: id.to_string(),
            url: url.to_string(),
            vcs: kind,
            reference: reference.map(str::to_string),
            path: rel_path,
            files: Vec::new(),
        });
        self.registry.save()?;

        let manifest = Manifest::load(&dest)?;
        let plan = installer::plan(&dest, &manifest)?;
        let copied = installer::install(&self.root, &plan)?;
        self.registry.merge_files(id, copied);
        self.registry.save()?;

        match kind {
            VcsKind::Git => println!("{}", format!("Cloned project {id}").green()),
            VcsKind::Svn => {
                println!("{}", "Successfully checked out working copy".green());
                tracing::info!(target: "manager", "checked out svn project {id}");
            }
        }
        Ok(manifest)
    }

    /// Pull the working copy of one project, or of every registered project
    /// of `kind` when no id is given. Never re-installs files or re-resolves
    /// dependencies; pull failures are reported, not fatal.
    pub async fn update(
        &mut self,
        target: Option<&str>,
        kind: Option<VcsKind>,
    ) -> Result<BatchReport> {
        let targets: Vec<ProjectRecord> = match target {
            Some(id) => {
                let record = self
                    .registry
                    .get(id)
                    .cloned()
                    .ok_or_else(|| SpmError::NotFound { id: id.to_string() })?;
                vec![record]
            }
            None => self
                .registry
                .iter()
                .filter(|r| kind.is_none_or(|k| r.vcs == k))
                .cloned()
                .collect(),
        };

        let mut report = BatchReport::default();
        for record in targets {
            let dir = self.root.join(&record.path);
            match vcs::pull(record.vcs, &dir).await {
                Ok(()) => {
                    tracing::debug!(target: "manager", "updated {}", record.id);
                    report.succeeded += 1;
                }
                Err(err) => report.record_failure(&record.id, &err),
            }
        }
        Ok(report)
    }

    /// Pull every registered project, verify the files it installed, and
    /// repair what is missing: re-install absent files and (when enabled)
    /// re-resolve dependencies that are no longer installed. Projects are
    /// processed in registration order; one project's failure never stops
    /// the rest.
    pub async fn sync(&mut self) -> Result<BatchReport> {
        let ids = self.registry.list();
        let mut report = BatchReport::default();
        for id in ids {
            match self.sync_project(&id).await {
                Ok(()) => report.succeeded += 1,
                Err(err) => report.record_failure(&id, &err),
            }
        }
        Ok(report)
    }

    async fn sync_project(&mut self, id: &str) -> Result<()> {
        let record = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| SpmError::NotFound { id: id.to_string() })?;
        let workdir = self.root.join(&record.path);

        if let Err(err) = vcs::pull(record.vcs, &workdir).await {
            // Best effort: a pull failure must not prevent repairing the
            // installed files from the copy we already have.
            tracing::warn!(target: "manager", "pull failed for {id}: {err:#}");
            eprintln!("{}", format!("{id}: {err:#}").yellow());
        }

        // The pull may have changed the manifest, so re-read it.
        let manifest = Manifest::load(&workdir)?;

        let any_missing = record.files.iter().any(|f| !self.root.join(f).exists());
        if any_missing {
            tracing::info!(target: "manager", "reinstalling missing files for {id}");
            let plan = installer::plan(&workdir, &manifest)?;
            let copied = installer::install(&self.root, &plan)?;
            self.registry.merge_files(id, copied);
            self.registry.save()?;
        }

        let missing_deps: Vec<_> = manifest
            .dependencies()
            .iter()
            .filter(|dep| !self.registry.exists(&resolver::dependency_id(dep)))
            .cloned()
            .collect();
        if !missing_deps.is_empty() {
            let enabled = self.settings.install_dependencies;
            let mut in_flight = vec![id.to_string()];
            resolver::resolve(self, missing_deps, enabled, &mut in_flight).await?;
        }
        Ok(())
    }

    /// Remove a project: its registry entry, its working copy, and exactly
    /// the files it installed.
    pub fn delete(&mut self, id: &str) -> Result<ProjectRecord> {
        let record = self
            .registry
            .remove(id)
            .ok_or_else(|| SpmError::NotFound { id: id.to_string() })?;

        let workdir = self.root.join(&record.path);
        fsutil::remove_dir_if_exists(&workdir).map_err(|err| SpmError::FileSystem {
            operation: format!("remove working copy ({err})"),
            path: workdir.display().to_string(),
        })?;
        installer::uninstall(&self.root, &record.files)?;
        self.registry.save()?;

        tracing::info!(target: "manager", "deleted project {id}");
        Ok(record)
    }

    /// Whether the project's working copy matches the remote head.
    pub async fn at_head(&self, id: &str) -> Result<bool> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| SpmError::NotFound { id: id.to_string() })?;
        let dir = self.root.join(&record.path);
        let local = vcs::local_revision(record.vcs, &dir).await?;
        let remote =
            vcs::remote_revision(record.vcs, &dir, &record.url, record.reference.as_deref())
                .await?;
        tracing::debug!(target: "manager", "{id}: local {local}, remote {remote}");
        Ok(local == remote)
    }
}
