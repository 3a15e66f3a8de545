//! Test helpers shared by unit and integration tests.
//!
//! [`TestGit`] wraps the system git client for building fixture
//! repositories; tests clone from the fixture's path directly, so no
//! network is involved.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Git command wrapper for constructing fixture repositories in tests.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    /// Create a wrapper for the repository at `repo_path`.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    fn run(&self, args: &[&str], action: &str) -> Result<std::process::Output> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .with_context(|| action.to_string())?;
        if !output.status.success() {
            bail!("{} failed: {}", action, String::from_utf8_lossy(&output.stderr));
        }
        Ok(output)
    }

    /// Path of the repository.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Initialize a repository with a fixed default branch name.
    pub fn init(&self) -> Result<()> {
        self.run(&["init", "--initial-branch", "main"], "Failed to initialize git repository")?;
        Ok(())
    }

    /// Configure the committer identity for tests.
    pub fn config_user(&self) -> Result<()> {
        self.run(
            &["config", "user.email", "test@spm.example"],
            "Failed to configure git user email",
        )?;
        self.run(&["config", "user.name", "Test User"], "Failed to configure git user name")?;
        // Allow clones of this repository to push/pull while it is checked out.
        self.run(
            &["config", "receive.denyCurrentBranch", "ignore"],
            "Failed to configure receive behavior",
        )?;
        Ok(())
    }

    /// Stage everything.
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "."], "Failed to add files to git")?;
        Ok(())
    }

    /// Commit staged changes.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message], "Failed to create git commit")?;
        Ok(())
    }

    /// Create and switch to a new branch.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.run(&["checkout", "-b", name], &format!("Failed to create branch: {name}"))?;
        Ok(())
    }

    /// Switch to an existing branch.
    pub fn checkout(&self, name: &str) -> Result<()> {
        self.run(&["checkout", name], &format!("Failed to checkout branch: {name}"))?;
        Ok(())
    }

    /// Current commit hash.
    pub fn rev_parse_head(&self) -> Result<String> {
        let output = self.run(&["rev-parse", "HEAD"], "Failed to get current commit SHA")?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Write a file inside the repository, creating parent directories.
    pub fn write_file(&self, rel: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = self.repo_path.join(rel.as_ref());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Initialize, configure, write the given files, and commit them.
    pub fn init_with_files(&self, files: &[(&str, &str)]) -> Result<()> {
        self.init()?;
        self.config_user()?;
        for (rel, content) in files {
            self.write_file(rel, content)?;
        }
        self.add_all()?;
        self.commit("initial commit")?;
        Ok(())
    }
}
