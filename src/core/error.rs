//! Error handling for spm.
//!
//! Two pieces work together here:
//! - [`SpmError`] - strongly-typed failure cases for precise handling in code
//! - [`Continuation`] - the signal the command layer uses to decide whether a
//!   failure aborts the invocation or is a reported no-op
//!
//! No error is process-fatal: batch operations (`sync`, `update` over all
//! projects) catch per-project failures, report them, and keep going. Single
//! target operations propagate their error up to the CLI, which maps it to a
//! [`Continuation`] and an exit code.

use thiserror::Error;

/// The main error type for spm operations.
///
/// Variants map onto the failure classes the system distinguishes:
/// transport problems talking to a remote repository, a missing
/// version-control client, registry lookups of unknown ids, file system
/// failures during install/uninstall, malformed manifests, and dependency
/// cycles detected during resolution.
#[derive(Error, Debug)]
pub enum SpmError {
    /// A version-control client invocation failed: network, authentication,
    /// or a missing remote repository.
    #[error("Transport failure during {operation}: {details}")]
    Transport {
        /// The client operation that failed (e.g. "clone", "pull")
        operation: String,
        /// The error output from the client
        details: String,
    },

    /// The external version-control client is not installed.
    #[error("{program} is not installed or not found in PATH")]
    ClientMissing {
        /// Name of the missing executable
        program: String,
    },

    /// A checkout targeted an id that is already registered. Reported as a
    /// no-op, never fatal.
    #[error("Project {id} is already installed")]
    AlreadyInstalled {
        /// The derived project id
        id: String,
    },

    /// An operation targeted an id the registry does not know.
    #[error("No project named {id} is installed")]
    NotFound {
        /// The requested project id
        id: String,
    },

    /// Permission or copy failure during install/uninstall.
    #[error("File system error during {operation}: {path}")]
    FileSystem {
        /// The file system operation that failed
        operation: String,
        /// Path where the failure occurred
        path: String,
    },

    /// A manifest descriptor was found but could not be parsed.
    #[error("Invalid manifest in {file}: {reason}")]
    ManifestParse {
        /// Path to the manifest file
        file: String,
        /// Parser diagnostics
        reason: String,
    },

    /// A dependency id matched an ancestor in the active resolution chain.
    #[error("Dependency cycle detected: {chain}")]
    DependencyCycle {
        /// The resolution chain that closed on itself
        chain: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Whether the invoking command layer should keep going or abort.
///
/// Every failure surfaces through this signal rather than terminating the
/// host: [`SpmError::AlreadyInstalled`] is a reported no-op and maps to
/// [`Continuation::Continue`]; everything else aborts the affected
/// invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The invocation may proceed; exit code 0.
    Continue,
    /// The invocation failed; exit code 1.
    Abort,
}

impl Continuation {
    /// Classify an error, walking the whole context chain so wrapping with
    /// `anyhow::Context` does not hide the typed cause.
    pub fn from_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(SpmError::AlreadyInstalled { .. }) = cause.downcast_ref::<SpmError>() {
                return Self::Continue;
            }
        }
        Self::Abort
    }
}
