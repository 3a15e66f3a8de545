//! The `spm svn` command family.
//!
//! Svn addresses branches through the checkout URL, so there is no separate
//! ref argument; the delete message keeps the svn-style wording scripts
//! match on.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::core::Continuation;
use crate::manager::ScriptManager;
use crate::vcs::VcsKind;

/// Manage projects backed by subversion repositories.
#[derive(Args)]
pub struct SvnCommand {
    #[command(subcommand)]
    command: SvnSubcommand,
}

#[derive(Subcommand)]
enum SvnSubcommand {
    /// Check out a working copy and install its files.
    Checkout {
        /// Repository URL (branch selection happens in the URL).
        url: String,
    },
    /// Remove a project and exactly the files it installed.
    Delete {
        /// Project id.
        id: String,
    },
}

impl SvnCommand {
    pub async fn execute(self, manager: &mut ScriptManager) -> Result<Continuation> {
        match self.command {
            SvnSubcommand::Checkout { url } => {
                manager.checkout(&url, None, VcsKind::Svn).await?;
                Ok(Continuation::Continue)
            }
            SvnSubcommand::Delete { id } => {
                manager.delete(&id)?;
                println!("{}", format!("Project uninstalled.{id}").green());
                Ok(Continuation::Continue)
            }
        }
    }
}
