//! Stage entity - one phase of the build pipeline and its outcome

use std::fmt;

use crate::error::{BuildError, FailureKind};

/// Pipeline phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preprocess,
    Compile,
    Bundle,
}

impl Stage {
    /// Verb shown in the status line header ("Building svc @ 12:00:01")
    pub fn verb(&self) -> &'static str {
        match self {
            Stage::Preprocess => "Stripping",
            Stage::Compile => "Building",
            Stage::Bundle => "Bundling",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Preprocess => "preprocess",
            Stage::Compile => "compile",
            Stage::Bundle => "bundle",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure of a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl StageFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&BuildError> for StageFailure {
    fn from(err: &BuildError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<BuildError> for StageFailure {
    fn from(err: BuildError) -> Self {
        Self::from(&err)
    }
}

/// Outcome of a single stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageResult {
    Success,
    Failure(StageFailure),
}

impl StageResult {
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        StageResult::Failure(StageFailure::new(kind, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StageResult::Success)
    }

    pub fn failure_ref(&self) -> Option<&StageFailure> {
        match self {
            StageResult::Success => None,
            StageResult::Failure(failure) => Some(failure),
        }
    }
}

impl<T> From<Result<T, BuildError>> for StageResult {
    fn from(result: Result<T, BuildError>) -> Self {
        match result {
            Ok(_) => StageResult::Success,
            Err(err) => StageResult::Failure(err.into()),
        }
    }
}

/// A stage that actually ran, with its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub result: StageResult,
}
