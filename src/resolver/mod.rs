//! Recursive dependency resolution.
//!
//! A manifest's dependency list is resolved depth-first: each entry is
//! checked out, installed, and then its own manifest is resolved in turn.
//! Two guards bound the walk:
//!
//! - ids already present in the registry are skipped, so a dependency
//!   referenced through several projects installs exactly once per pass;
//! - an explicit in-flight id set tracks the active call chain, and a
//!   dependency whose id matches an ancestor is an error instead of a
//!   recursion.
//!
//! Dependency ids carry a backend suffix (`-git`/`-svn`) on top of the
//! usual derivation so the same logical dependency fetched via two backends
//! can coexist without collision.
//!
//! A failure on one dependency is reported and the remaining entries are
//! still processed; resolution as a whole only fails on internal errors,
//! not on a misbehaving dependency.

use anyhow::Result;
use colored::Colorize;
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::core::SpmError;
use crate::manager::ScriptManager;
use crate::manifest::DependencySpec;
use crate::vcs;

/// Derive the registry id for a dependency entry: the usual url+ref
/// derivation plus the backend suffix.
pub fn dependency_id(dep: &DependencySpec) -> String {
    let mut id = vcs::project_id(&dep.url, dep.reference.as_deref());
    id.push('-');
    id.push_str(dep.vcs.dir_name());
    id
}

/// Resolve a dependency list.
///
/// When `enabled` is false this does nothing at all - no checkouts and no
/// progress message. Otherwise a non-empty list announces itself with
/// `Installing dependencies` before the first checkout. `in_flight` is the
/// chain of ids currently being resolved, threaded through the recursion
/// for cycle detection; callers seed it with the id of the project whose
/// manifest is being resolved.
pub fn resolve<'a>(
    manager: &'a mut ScriptManager,
    dependencies: Vec<DependencySpec>,
    enabled: bool,
    in_flight: &'a mut Vec<String>,
) -> BoxFuture<'a, Result<()>> {
    async move {
        if !enabled || dependencies.is_empty() {
            return Ok(());
        }
        println!("Installing dependencies");

        for dep in dependencies {
            let id = dependency_id(&dep);

            if manager.registry().exists(&id) {
                tracing::debug!(target: "resolver", "dependency {id} already installed");
                continue;
            }
            if in_flight.iter().any(|ancestor| *ancestor == id) {
                let chain = format!("{} -> {id}", in_flight.join(" -> "));
                let err = SpmError::DependencyCycle { chain };
                tracing::error!(target: "resolver", "{err}");
                eprintln!("{}", err.to_string().red());
                continue;
            }

            in_flight.push(id.clone());
            let outcome = install_dependency(manager, &dep, &id, in_flight).await;
            in_flight.pop();

            if let Err(err) = outcome {
                tracing::error!(target: "resolver", "failed to install dependency {id}: {err:#}");
                eprintln!("{}", format!("Failed to install dependency {id}: {err:#}").red());
            }
        }
        Ok(())
    }
    .boxed()
}

/// Check out one dependency and resolve its own manifest in turn.
async fn install_dependency(
    manager: &mut ScriptManager,
    dep: &DependencySpec,
    id: &str,
    in_flight: &mut Vec<String>,
) -> Result<()> {
    let manifest = manager
        .install_project(&dep.url, dep.reference.as_deref(), dep.vcs, id)
        .await?;
    resolve(manager, manifest.dependencies().to_vec(), true, in_flight).await
}
