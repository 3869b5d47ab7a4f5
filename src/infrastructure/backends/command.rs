//! External tool invocation shared by every backend

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{BuildError, BuildResult};

/// Program plus leading arguments, e.g. `npx ncc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

/// Captured output of a successful run
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Split a command line on whitespace; the first word is the program.
    ///
    /// Returns `None` for a blank string.
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run to completion inside `working_dir`.
    ///
    /// Spawn errors and non-zero exits become `BackendFailure`; the message is
    /// the tool's stdout, falling back to stderr, then to a generic line.
    pub async fn run(
        &self,
        backend: &str,
        args: &[OsString],
        working_dir: &Path,
        environment: &str,
    ) -> BuildResult<ToolOutput> {
        debug!(backend, program = %self.program, ?args, "invoking tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(args)
            .current_dir(working_dir)
            .env("NODE_ENV", environment)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| BuildError::BackendFailure {
                backend: backend.to_string(),
                message: format!("failed to start `{}`: {}", self.program, err),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!(backend, stderr = %stderr.trim(), "tool stderr");
        }

        if output.status.success() {
            return Ok(ToolOutput {
                stdout: output.stdout,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let message = [stdout.trim(), stderr.trim()]
            .into_iter()
            .find(|text| !text.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Failed to build using {}", backend));

        Err(BuildError::BackendFailure {
            backend: backend.to_string(),
            message,
        })
    }
}
