//! Read-only bindings exposed to the embedded scripting language.
//!
//! These are the `git_*` query functions scripts call to inspect the
//! registry. None of them mutates any state; mutation always goes through
//! the command surface.

use anyhow::Result;
use serde_json::{Value, json};

use crate::core::SpmError;
use crate::manager::ScriptManager;

/// Ids of all installed projects, in registration order.
pub fn git_list(manager: &ScriptManager) -> Vec<String> {
    manager.registry().list()
}

/// Whether a project with this id is installed.
pub fn git_exists(manager: &ScriptManager, id: &str) -> bool {
    manager.registry().exists(id)
}

/// Whether the project's working copy matches the remote head.
pub async fn git_at_head(manager: &ScriptManager, id: &str) -> Result<bool> {
    manager.at_head(id).await
}

/// Structured record describing an installed project. Exposes at minimum a
/// `url` field; also carries the backend, ref, and working copy path.
pub fn git_info(manager: &ScriptManager, id: &str) -> Result<Value> {
    let record = manager
        .registry()
        .get(id)
        .ok_or_else(|| SpmError::NotFound { id: id.to_string() })?;
    Ok(json!({
        "url": record.url,
        "vcs": record.vcs.to_string(),
        "ref": record.reference,
        "path": record.path.display().to_string(),
    }))
}
