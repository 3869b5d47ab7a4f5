//! Error types for appbuild
//!
//! Library code returns `BuildError`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for appbuild operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for appbuild operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Backend identifier is not registered
    #[error("Specified builder [{id}] not found")]
    UnknownBackend { id: String },

    /// Compile stage requested without a backend
    #[error("Missing builder target")]
    MissingTarget,

    /// No entry file could be resolved
    #[error("entry file not found in {}: expected main.(ts|js) or index.(ts|js)", .directory.display())]
    EntryNotFound { directory: PathBuf },

    /// Comment stripping failed (the pipeline falls back to the original source)
    #[error("failed to strip comments from {}: {message}", .source_dir.display())]
    PreprocessFailure { source_dir: PathBuf, message: String },

    /// External tool reported an error
    #[error("{message}")]
    BackendFailure { backend: String, message: String },

    /// Asset overlay failed
    #[error("failed to copy {}: {message}", .path.display())]
    AssetMergeFailure { path: PathBuf, message: String },

    /// A resolved setting that would escape or destroy project directories
    #[error("invalid {setting}: {message}")]
    InvalidSetting { setting: &'static str, message: String },

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", .file.display())]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal fault
    #[error("internal error: {0}")]
    Internal(String),
}

/// Classification of a stage failure, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    UnknownBackend,
    MissingTarget,
    EntryNotFound,
    PreprocessFailure,
    BackendFailure,
    AssetMergeFailure,
    InvalidSetting,
    Config,
    Io,
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownBackend => "unknown_backend",
            FailureKind::MissingTarget => "missing_target",
            FailureKind::EntryNotFound => "entry_not_found",
            FailureKind::PreprocessFailure => "preprocess_failure",
            FailureKind::BackendFailure => "backend_failure",
            FailureKind::AssetMergeFailure => "asset_merge_failure",
            FailureKind::InvalidSetting => "invalid_setting",
            FailureKind::Config => "config",
            FailureKind::Io => "io",
            FailureKind::Internal => "internal",
        }
    }
}

impl BuildError {
    pub fn kind(&self) -> FailureKind {
        match self {
            BuildError::UnknownBackend { .. } => FailureKind::UnknownBackend,
            BuildError::MissingTarget => FailureKind::MissingTarget,
            BuildError::EntryNotFound { .. } => FailureKind::EntryNotFound,
            BuildError::PreprocessFailure { .. } => FailureKind::PreprocessFailure,
            BuildError::BackendFailure { .. } => FailureKind::BackendFailure,
            BuildError::AssetMergeFailure { .. } => FailureKind::AssetMergeFailure,
            BuildError::InvalidSetting { .. } => FailureKind::InvalidSetting,
            BuildError::Config { .. } => FailureKind::Config,
            BuildError::Io(_) => FailureKind::Io,
            BuildError::Internal(_) => FailureKind::Internal,
        }
    }

    /// Faults that must escape the orchestrator instead of becoming a failed stage.
    pub fn is_internal(&self) -> bool {
        matches!(self, BuildError::Internal(_))
    }
}
