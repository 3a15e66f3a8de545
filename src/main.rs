//! spm CLI entry point.

use anyhow::Result;
use clap::Parser;
use spm_cli::cli;
use spm_cli::core::Continuation;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(Continuation::Continue) => Ok(()),
        Ok(Continuation::Abort) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}
