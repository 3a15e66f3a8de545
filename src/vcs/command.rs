//! Builder for invoking the external version-control clients.
//!
//! All git and svn invocations go through [`VcsCommand`] so that working
//! directory handling, output capture, timeouts, tracing, and error mapping
//! behave identically everywhere. Non-zero exits become
//! [`SpmError::Transport`]; a missing executable becomes
//! [`SpmError::ClientMissing`].

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::Command;
use tokio::time::timeout;

use super::VcsKind;
use crate::constants::DEFAULT_VCS_TIMEOUT_SECS;
use crate::core::SpmError;

/// A single invocation of the `git` or `svn` client.
///
/// ```rust,ignore
/// let head = VcsCommand::new(VcsKind::Git)
///     .args(["rev-parse", "HEAD"])
///     .current_dir(&workdir)
///     .execute_stdout()
///     .await?;
/// ```
pub struct VcsCommand {
    program: &'static str,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    timeout_duration: Option<Duration>,
}

impl VcsCommand {
    /// Create a builder for the given backend's client.
    ///
    /// Commands default to a guard timeout so a client waiting on an
    /// authentication prompt cannot hang the host forever.
    pub fn new(kind: VcsKind) -> Self {
        Self {
            program: kind.client_program(),
            args: Vec::new(),
            current_dir: None,
            timeout_duration: Some(Duration::from_secs(DEFAULT_VCS_TIMEOUT_SECS)),
        }
    }

    /// Set the working directory the client runs in.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Override the guard timeout (`None` disables it).
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Run the command and capture its output.
    pub async fn execute(self) -> Result<VcsOutput> {
        let start = std::time::Instant::now();
        let operation = self.args.first().cloned().unwrap_or_else(|| "unknown".to_string());

        let mut cmd = Command::new(self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!(
            target: "vcs",
            "Executing command: {} {}",
            self.program,
            self.args.join(" ")
        );

        let output_future = cmd.output();
        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        target: "vcs",
                        "Command timed out after {}s: {} {}",
                        duration.as_secs(),
                        self.program,
                        self.args.join(" ")
                    );
                    return Err(SpmError::Transport {
                        operation,
                        details: format!(
                            "{} command timed out after {} seconds",
                            self.program,
                            duration.as_secs()
                        ),
                    }
                    .into());
                }
            }
        } else {
            output_future.await
        };

        let output = match output {
            Ok(output) => output,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SpmError::ClientMissing {
                    program: self.program.to_string(),
                }
                .into());
            }
            Err(err) => {
                return Err(err)
                    .context(format!("Failed to execute {} {}", self.program, operation));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            tracing::debug!(
                target: "vcs",
                "Command failed with exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            );
            return Err(SpmError::Transport {
                operation,
                details: if stderr.trim().is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.trim().to_string()
                },
            }
            .into());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "vcs::perf",
                "{} {} took {:.2}s",
                self.program,
                operation,
                elapsed.as_secs_f64()
            );
        }

        Ok(VcsOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run the command and return trimmed stdout.
    pub async fn execute_stdout(self) -> Result<String> {
        let output = self.execute().await?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run the command, caring only that it succeeded.
    pub async fn execute_success(self) -> Result<()> {
        self.execute().await?;
        Ok(())
    }
}

/// Captured output of a client invocation.
#[derive(Debug)]
pub struct VcsOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}
