//! Subversion client operations.
//!
//! Svn addresses branches through the URL itself (`.../branches/<name>`), so
//! unlike git there is no separate ref to check out.

use std::path::Path;

use anyhow::Result;

use super::{VcsCommand, VcsKind};

/// Check out `url` into `dest`.
pub(super) async fn checkout(url: &str, dest: &Path) -> Result<()> {
    VcsCommand::new(VcsKind::Svn)
        .args(["checkout", "--non-interactive", url])
        .arg(dest.display().to_string())
        .execute_success()
        .await
}

/// Bring the working copy up to the latest remote revision.
pub(super) async fn update(dir: &Path) -> Result<()> {
    VcsCommand::new(VcsKind::Svn)
        .args(["update", "--non-interactive"])
        .current_dir(dir)
        .execute_success()
        .await
}

/// Last-changed revision of the working copy.
pub(super) async fn local_revision(dir: &Path) -> Result<String> {
    VcsCommand::new(VcsKind::Svn)
        .args(["info", "--non-interactive", "--show-item", "last-changed-revision"])
        .current_dir(dir)
        .execute_stdout()
        .await
}

/// Last-changed revision of the remote URL.
pub(super) async fn remote_revision(url: &str) -> Result<String> {
    VcsCommand::new(VcsKind::Svn)
        .args(["info", "--non-interactive", "--show-item", "last-changed-revision", url])
        .execute_stdout()
        .await
}
