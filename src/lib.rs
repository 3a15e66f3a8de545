//! spm - Script Package Manager
//!
//! A small package manager for community-authored automation scripts that
//! live in externally hosted git or subversion repositories. It discovers,
//! installs, updates, and synchronizes script projects, resolving the
//! transitive dependencies each project declares, and exposes a read-only
//! query surface to an embedded scripting environment.
//!
//! # Architecture Overview
//!
//! - Working copies are cloned under `<root>/git/<id>/` or
//!   `<root>/svn/<id>/`, where the id derives deterministically from the
//!   repository URL and ref.
//! - A project's installable files are declared by an optional
//!   `manifest.toml` (paths relative to the manifest's own directory) or,
//!   absent one, by convention: everything under the `scripts/`, `relay/`,
//!   and `data/` folders.
//! - The installer copies only allow-listed categories into the matching
//!   destination roots and never overwrites what is already there.
//! - The registry (`projects.toml`) is the persisted source of truth:
//!   project id, url, backend, ref, working copy path, and the exact files
//!   the project installed.
//! - Dependency resolution recursively checks out the projects a manifest
//!   references, deduplicating by id and guarding against cycles.
//!
//! Like Cargo, spm does not implement the git or svn protocols; it shells
//! out to the system clients and treats them as transport.
//!
//! # Core Modules
//!
//! - [`vcs`] - backend abstraction over the external git/svn clients
//! - [`manifest`] - per-project descriptor with conventional fallback
//! - [`installer`] - allow-listed file copying into destination roots
//! - [`resolver`] - recursive dependency resolution
//! - [`registry`] - persisted project records
//! - [`manager`] - checkout/update/sync/delete orchestration
//! - [`scripting`] - read-only query bindings for the embedded language
//! - [`cli`] - the `spm git ...` / `spm svn ...` command surface
//! - [`config`] - settings (`install-dependencies`)
//! - [`core`] - error types and the continuation-state signal

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod manager;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod scripting;
pub mod utils;
pub mod vcs;

// test_utils is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
