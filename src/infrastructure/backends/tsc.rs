//! TypeScript compiler Backend
//!
//! Project-based: `tsc` reads `tsconfig.json` from the working directory, so
//! no entry file is resolved. Output is emitted straight into the output
//! directory, which is cleared first.

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::entities::CompiledOutput;
use crate::domain::ports::{Backend, CompileJob, EntryRequest};
use crate::error::BuildResult;
use crate::infrastructure::fs::clear_dir;

use super::ToolCommand;

pub const TSC_ID: &str = "tsc";

pub struct TscBackend {
    command: ToolCommand,
}

impl TscBackend {
    pub fn new() -> Self {
        Self::with_command(ToolCommand::new("tsc"))
    }

    pub fn with_command(command: ToolCommand) -> Self {
        Self { command }
    }
}

impl Default for TscBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for TscBackend {
    fn id(&self) -> &str {
        TSC_ID
    }

    fn resolve_entry(&self, _request: &EntryRequest) -> BuildResult<Option<PathBuf>> {
        Ok(None)
    }

    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput> {
        clear_dir(&job.output_dir).await?;

        let args: Vec<OsString> = vec!["--outDir".into(), job.output_dir.as_os_str().into()];
        self.command
            .run(TSC_ID, &args, &job.working_dir, &job.environment)
            .await?;

        Ok(CompiledOutput::OnDisk)
    }
}
