//! Shared constants for file names, directory layout, and limits.

/// File name of the optional per-project manifest descriptor.
///
/// The manifest may live anywhere inside a working copy; all paths it
/// declares resolve relative to its own directory.
pub const MANIFEST_FILE: &str = "manifest.toml";

/// File name of the persisted project registry, stored at the managed root.
pub const REGISTRY_FILE: &str = "projects.toml";

/// File name of the settings file, stored at the managed root.
pub const SETTINGS_FILE: &str = "spm.toml";

/// Categories of files a project is allowed to install, and the destination
/// roots they map to. Anything outside this set is never copied.
pub const PERMISSIBLE_CATEGORIES: [&str; 3] = ["scripts", "relay", "data"];

/// Default timeout for version-control client invocations, in seconds.
pub const DEFAULT_VCS_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding the managed root directory.
pub const ENV_ROOT: &str = "SPM_ROOT";
