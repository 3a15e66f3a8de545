//! The `spm git` command family.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::core::Continuation;
use crate::manager::ScriptManager;
use crate::vcs::VcsKind;

/// Manage projects backed by git repositories.
#[derive(Args)]
pub struct GitCommand {
    #[command(subcommand)]
    command: GitSubcommand,
}

#[derive(Subcommand)]
enum GitSubcommand {
    /// Clone a project and install its files.
    Checkout {
        /// Repository URL.
        url: String,
        /// Branch or ref to track.
        reference: Option<String>,
    },
    /// Pull the working copy of one project, or of all git projects.
    Update {
        /// Project id; omit to update every git project.
        id: Option<String>,
    },
    /// List installed projects in registration order.
    List,
    /// Pull every project and reinstall whatever went missing.
    Sync,
    /// Remove a project and exactly the files it installed.
    Delete {
        /// Project id.
        id: String,
    },
}

impl GitCommand {
    pub async fn execute(self, manager: &mut ScriptManager) -> Result<Continuation> {
        match self.command {
            GitSubcommand::Checkout { url, reference } => {
                manager
                    .checkout(&url, reference.as_deref(), VcsKind::Git)
                    .await?;
                Ok(Continuation::Continue)
            }
            GitSubcommand::Update { id } => {
                manager.update(id.as_deref(), Some(VcsKind::Git)).await?;
                Ok(Continuation::Continue)
            }
            GitSubcommand::List => {
                for id in manager.registry().list() {
                    println!("{id}");
                }
                Ok(Continuation::Continue)
            }
            GitSubcommand::Sync => {
                manager.sync().await?;
                Ok(Continuation::Continue)
            }
            GitSubcommand::Delete { id } => {
                manager.delete(&id)?;
                println!("{}", format!("Project {id} removed").green());
                Ok(Continuation::Continue)
            }
        }
    }
}
