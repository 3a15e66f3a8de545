//! Git client operations.

use std::path::Path;

use anyhow::Result;

use super::{VcsCommand, VcsKind};

/// Clone `url` into `dest`. When a ref is given the clone is restricted to
/// that branch so the working copy tracks it directly.
pub(super) async fn clone(url: &str, reference: Option<&str>, dest: &Path) -> Result<()> {
    let mut cmd = VcsCommand::new(VcsKind::Git).arg("clone");
    if let Some(reference) = reference {
        cmd = cmd.args(["--branch", reference, "--single-branch"]);
    }
    cmd.arg(url).arg(dest.display().to_string()).execute_success().await
}

/// Fast-forward the working copy to the remote state. A no-op when already
/// current.
pub(super) async fn pull(dir: &Path) -> Result<()> {
    VcsCommand::new(VcsKind::Git)
        .args(["pull", "--ff-only"])
        .current_dir(dir)
        .execute_success()
        .await
}

/// Commit hash the working copy currently points at.
pub(super) async fn local_revision(dir: &Path) -> Result<String> {
    VcsCommand::new(VcsKind::Git)
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .execute_stdout()
        .await
}

/// Commit hash of the tracked ref on the remote, without touching the
/// working copy.
pub(super) async fn remote_revision(dir: &Path, reference: Option<&str>) -> Result<String> {
    let target = reference.unwrap_or("HEAD");
    let listing = VcsCommand::new(VcsKind::Git)
        .args(["ls-remote", "origin", target])
        .current_dir(dir)
        .execute_stdout()
        .await?;
    // ls-remote prints "<hash>\t<ref>" per match; the first hash is the one
    // we asked for.
    Ok(listing.split_whitespace().next().unwrap_or_default().to_string())
}
