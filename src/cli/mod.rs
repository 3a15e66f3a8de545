//! Command-line interface.
//!
//! The surface mirrors the two command families the scripting host exposes:
//!
//! ```bash
//! spm git checkout <url> [ref]
//! spm git update [id]
//! spm git list
//! spm git sync
//! spm git delete <id>
//!
//! spm svn checkout <url>
//! spm svn delete <id>
//! ```
//!
//! All commands operate on a managed root directory (current directory by
//! default, overridable with `--root` or `SPM_ROOT`) holding the working
//! copies, the destination roots, the registry, and the settings file.

mod git;
mod svn;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::constants::ENV_ROOT;
use crate::core::Continuation;
use crate::manager::ScriptManager;

/// Top-level argument structure.
#[derive(Parser)]
#[command(name = "spm", version, about = "Script package manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Managed root directory (defaults to the current directory).
    #[arg(long, global = true, env = ENV_ROOT)]
    root: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable all logging output.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects backed by git repositories.
    Git(git::GitCommand),
    /// Manage projects backed by subversion repositories.
    Svn(svn::SvnCommand),
}

impl Cli {
    /// Run the parsed command and report whether the host should continue.
    pub async fn execute(self) -> Result<Continuation> {
        init_logging(self.verbose, self.quiet);

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let mut manager = ScriptManager::open(root)?;

        let result = match self.command {
            Commands::Git(cmd) => cmd.execute(&mut manager).await,
            Commands::Svn(cmd) => cmd.execute(&mut manager).await,
        };

        Ok(match result {
            Ok(continuation) => continuation,
            Err(err) => report(err),
        })
    }
}

/// Map an operation error to its continuation state and show it to the
/// user: no-ops as plain notices, real failures in red on stderr.
fn report(err: anyhow::Error) -> Continuation {
    let continuation = Continuation::from_error(&err);
    match continuation {
        Continuation::Continue => println!("{err:#}"),
        Continuation::Abort => eprintln!("{}", format!("{err:#}").red()),
    }
    continuation
}

/// Set up the tracing subscriber. Logs go to stderr so the load-bearing
/// stdout messages stay clean for scripts capturing them.
fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
