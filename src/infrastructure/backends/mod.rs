//! Infrastructure Backends
//!
//! These backends implement the `Backend` port from the domain layer. Each
//! wraps one external compiler/bundler; the registry maps command-line
//! identifiers to them.

mod command;
pub mod esbuild;
pub mod ncc;
pub mod tsc;
pub mod vite;

pub use command::{ToolCommand, ToolOutput};
pub use esbuild::{EsbuildBackend, ESBUILD_ID};
pub use ncc::{NccBackend, NCC_ID};
pub use tsc::{TscBackend, TSC_ID};
pub use vite::{ViteBackend, VITE_ID};

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::domain::ports::{Backend, CompileJob};
use crate::error::{BuildError, BuildResult};

/// Identifiers of the built-in backends
pub const BUILTIN_BACKENDS: [&str; 4] = [NCC_ID, ESBUILD_ID, TSC_ID, VITE_ID];

/// Backends available to the pipeline, keyed by identifier
#[derive(Clone, Default)]
pub struct BackendRegistry {
    backends: BTreeMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// ncc, esbuild, tsc and vite with their default executables
    pub fn builtin() -> Self {
        Self::with_commands(&HashMap::new())
    }

    /// Built-in backends, with the executable of any listed id replaced
    pub fn with_commands(commands: &HashMap<String, ToolCommand>) -> Self {
        let command = |id: &str| commands.get(id).cloned();

        Self::new()
            .with(Arc::new(
                command(NCC_ID).map_or_else(NccBackend::new, NccBackend::with_command),
            ))
            .with(Arc::new(
                command(ESBUILD_ID).map_or_else(EsbuildBackend::new, EsbuildBackend::with_command),
            ))
            .with(Arc::new(
                command(TSC_ID).map_or_else(TscBackend::new, TscBackend::with_command),
            ))
            .with(Arc::new(
                command(VITE_ID).map_or_else(ViteBackend::new, ViteBackend::with_command),
            ))
    }

    /// Add or replace a backend; returns the one it replaced
    pub fn register(&mut self, backend: Arc<dyn Backend>) -> Option<Arc<dyn Backend>> {
        self.backends.insert(backend.id().to_string(), backend)
    }

    pub fn with(mut self, backend: Arc<dyn Backend>) -> Self {
        self.register(backend);
        self
    }

    pub fn get(&self, id: &str) -> BuildResult<Arc<dyn Backend>> {
        self.backends
            .get(id)
            .cloned()
            .ok_or_else(|| BuildError::UnknownBackend { id: id.to_string() })
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&str> {
        self.backends.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendRegistry")
            .field("backends", &self.ids())
            .finish()
    }
}

/// Entry of a job for a backend that cannot run without one
pub(crate) fn require_entry<'a>(backend: &str, job: &'a CompileJob) -> BuildResult<&'a Path> {
    job.entry.as_deref().ok_or_else(|| {
        BuildError::Internal(format!("{} backend invoked without a resolved entry", backend))
    })
}
