//! Backend port - one external compiler or bundler
//!
//! Every backend takes the same input (a `CompileJob`) and produces the same
//! output shape (`CompiledOutput`), so the pipeline never needs to know which
//! tool is behind an identifier.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::entities::CompiledOutput;
use crate::domain::services::entry_resolver;
use crate::error::BuildResult;

/// Request to locate the file a backend should start from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRequest {
    /// Source file, or directory to search
    pub source: PathBuf,
    /// Explicit index file name inside `source`
    pub index: Option<String>,
}

impl EntryRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: Option<String>) -> Self {
        self.index = index;
        self
    }
}

/// Everything a backend needs to compile one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    pub app: String,
    /// Resolved entry file; `None` for project-based backends
    pub entry: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Directory the external tool runs in
    pub working_dir: PathBuf,
    pub environment: String,
    pub verbose: bool,
}

/// Interchangeable compiler/bundler adapter
#[async_trait]
pub trait Backend: Send + Sync {
    /// Identifier used on the command line (`-t <id>`)
    fn id(&self) -> &str;

    /// Locate the entry file before compiling.
    ///
    /// Backends that accept a directory share one lookup rule; project-based
    /// backends override this to return `None`.
    fn resolve_entry(&self, request: &EntryRequest) -> BuildResult<Option<PathBuf>> {
        entry_resolver::resolve_entry(request).map(Some)
    }

    /// Run the tool.
    ///
    /// `OnDisk` backends must leave nothing stale in `job.output_dir`.
    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput>;
}
