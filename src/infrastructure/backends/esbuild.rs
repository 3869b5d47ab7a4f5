//! esbuild Backend
//!
//! Bundles the entry with esbuild writing to stdout; the captured bundle is
//! returned as an in-memory artifact.

use std::ffi::OsString;

use async_trait::async_trait;

use crate::domain::entities::{Artifact, CompiledOutput};
use crate::domain::ports::{Backend, CompileJob};
use crate::error::BuildResult;

use super::{require_entry, ToolCommand};

pub const ESBUILD_ID: &str = "esbuild";

pub struct EsbuildBackend {
    command: ToolCommand,
}

impl EsbuildBackend {
    pub fn new() -> Self {
        Self::with_command(ToolCommand::new("esbuild"))
    }

    pub fn with_command(command: ToolCommand) -> Self {
        Self { command }
    }

    fn arguments(entry: &std::path::Path) -> Vec<OsString> {
        vec![
            entry.into(),
            "--bundle".into(),
            "--minify".into(),
            "--platform=node".into(),
            "--target=es2020".into(),
            "--log-level=error".into(),
        ]
    }
}

impl Default for EsbuildBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for EsbuildBackend {
    fn id(&self) -> &str {
        ESBUILD_ID
    }

    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput> {
        let entry = require_entry(ESBUILD_ID, job)?;
        let output = self
            .command
            .run(
                ESBUILD_ID,
                &Self::arguments(entry),
                &job.working_dir,
                &job.environment,
            )
            .await?;

        Ok(CompiledOutput::InMemory(Artifact::javascript(output.stdout)))
    }
}
