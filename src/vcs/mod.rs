//! Version-control backend abstraction.
//!
//! spm does not speak the git or svn wire protocols itself. Like Cargo, it
//! shells out to the system clients and treats them as black boxes exposing
//! clone, pull, and revision queries. [`VcsKind`] is the per-project
//! discriminant; dispatch to the concrete client lives here so call sites
//! never type-switch on the backend.
//!
//! Revisions are opaque strings: a git commit hash on one side, an svn
//! revision number on the other. Equality of the local and remote revision
//! defines "at head".

pub mod command;
mod git;
mod svn;

pub use command::VcsCommand;

use std::fmt;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which external version-control client backs a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    /// Backed by the `git` command-line client.
    #[default]
    Git,
    /// Backed by the `svn` command-line client.
    Svn,
}

impl VcsKind {
    /// Directory under the managed root holding working copies of this kind,
    /// also used as the id suffix for dependency entries.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
        }
    }

    /// Name of the external client executable.
    pub const fn client_program(self) -> &'static str {
        match self {
            Self::Git => {
                if cfg!(windows) {
                    "git.exe"
                } else {
                    "git"
                }
            }
            Self::Svn => {
                if cfg!(windows) {
                    "svn.exe"
                } else {
                    "svn"
                }
            }
        }
    }

    /// Whether the client executable can be found on this machine.
    pub fn client_available(self) -> bool {
        which::which(self.client_program()).is_ok()
    }
}

impl fmt::Display for VcsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Clone `url` into `dest`, checking out `reference` when one is given.
///
/// The destination must not exist; the caller is responsible for clearing
/// leftovers and for rejecting ids that are already registered.
pub async fn clone(
    kind: VcsKind,
    url: &str,
    reference: Option<&str>,
    dest: &Path,
) -> Result<()> {
    match kind {
        VcsKind::Git => git::clone(url, reference, dest).await,
        VcsKind::Svn => svn::checkout(url, dest).await,
    }
}

/// Refresh the working copy at `dir` to the latest remote state.
///
/// Idempotent: a no-op when the copy is already current.
pub async fn pull(kind: VcsKind, dir: &Path) -> Result<()> {
    match kind {
        VcsKind::Git => git::pull(dir).await,
        VcsKind::Svn => svn::update(dir).await,
    }
}

/// Opaque revision identifier of the working copy at `dir`.
pub async fn local_revision(kind: VcsKind, dir: &Path) -> Result<String> {
    match kind {
        VcsKind::Git => git::local_revision(dir).await,
        VcsKind::Svn => svn::local_revision(dir).await,
    }
}

/// Opaque revision identifier of the remote head the project tracks.
pub async fn remote_revision(
    kind: VcsKind,
    dir: &Path,
    url: &str,
    reference: Option<&str>,
) -> Result<String> {
    match kind {
        VcsKind::Git => git::remote_revision(dir, reference).await,
        VcsKind::Svn => svn::remote_revision(url).await,
    }
}

/// Derive the deterministic project id for a repository URL and optional ref.
///
/// The scheme and host are dropped, the remaining path segments are joined
/// with `-`, a trailing `.git` is stripped, and the ref (when given) is
/// appended. Characters outside `[A-Za-z0-9._-]` are replaced with `-` so the
/// id is always a safe directory name.
pub fn project_id(url: &str, reference: Option<&str>) -> String {
    let trimmed = url.trim().trim_end_matches('/');

    // Drop scheme and host for URL forms; scp-like addresses (user@host:path)
    // keep only the path after the colon. Plain local paths are used as-is.
    let path_part = if let Some((_, after_scheme)) = trimmed.split_once("://") {
        after_scheme.split_once('/').map_or("", |(_, path)| path)
    } else if trimmed.contains('@') && trimmed.contains(':') {
        trimmed.split_once(':').map_or(trimmed, |(_, path)| path)
    } else {
        trimmed
    };

    let mut segments: Vec<&str> = path_part
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if let Some(last) = segments.last_mut() {
        *last = last.strip_suffix(".git").unwrap_or(last);
    }

    let mut id = segments.join("-");
    if let Some(reference) = reference {
        id.push('-');
        id.push_str(reference);
    }

    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
