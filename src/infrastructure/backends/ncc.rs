//! ncc Backend
//!
//! Bundles a Node application and its dependencies into a single minified
//! file. ncc writes `index.js` into a private temp directory; the bundle is
//! read back and handed to the pipeline as an in-memory artifact
//! (`<output>/<app>.js`).

use std::ffi::OsString;

use async_trait::async_trait;

use crate::domain::entities::{Artifact, CompiledOutput};
use crate::domain::ports::{Backend, CompileJob};
use crate::error::{BuildError, BuildResult};

use super::{require_entry, ToolCommand};

pub const NCC_ID: &str = "ncc";

pub struct NccBackend {
    command: ToolCommand,
}

impl NccBackend {
    pub fn new() -> Self {
        Self::with_command(ToolCommand::new("ncc"))
    }

    pub fn with_command(command: ToolCommand) -> Self {
        Self { command }
    }
}

impl Default for NccBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for NccBackend {
    fn id(&self) -> &str {
        NCC_ID
    }

    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput> {
        let entry = require_entry(NCC_ID, job)?;
        let scratch = tempfile::Builder::new().prefix("appbuild-ncc").tempdir()?;

        let args: Vec<OsString> = vec![
            "build".into(),
            entry.into(),
            "--minify".into(),
            "--quiet".into(),
            "--target".into(),
            "es2020".into(),
            "--out".into(),
            scratch.path().into(),
        ];
        self.command
            .run(NCC_ID, &args, &job.working_dir, &job.environment)
            .await?;

        let bundle = scratch.path().join("index.js");
        let code = tokio::fs::read(&bundle)
            .await
            .map_err(|err| BuildError::BackendFailure {
                backend: NCC_ID.to_string(),
                message: format!("ncc produced no bundle at {}: {}", bundle.display(), err),
            })?;

        Ok(CompiledOutput::InMemory(Artifact::javascript(code)))
    }
}
