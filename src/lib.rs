//! appbuild - multi-backend build orchestrator
//!
//! Compiles a TypeScript/JavaScript application with one of several
//! interchangeable backends (ncc, esbuild, tsc, vite), then overlays a shared
//! asset tree and an environment-specific one into the output directory.
//!
//! ## Architecture
//!
//! - `domain` - stages, merge plans, the `Backend` and `Reporter` ports, pure services
//! - `infrastructure` - async file system helpers and the backend adapters
//! - `application` - the pipeline, preprocessor, asset merger and summary
//! - `config` - `appbuild.toml`, environment variables and flag layering
//! - `presentation` - command-line parsing

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{AssetMerger, BuildPipeline, BuildSummary, PipelineOutcome, Preprocessor};
pub use config::{BuildConfiguration, ProjectConfig};
pub use domain::entities::{MergePlan, MergeReport, Stage, StageResult};
pub use domain::ports::{Backend, NoopReporter, Reporter};
pub use error::{BuildError, BuildResult, FailureKind};
pub use infrastructure::BackendRegistry;
