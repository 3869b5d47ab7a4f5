//! Application Layer
//!
//! Use cases that sequence the domain and infrastructure pieces.
//!
//! - `BuildPipeline` - preprocess, compile, bundle for one application
//! - `Preprocessor` - comment-stripped copy of the sources
//! - `AssetMerger` - layered asset overlay
//! - `BuildSummary` - per-invocation aggregation and exit status

pub mod assets;
pub mod pipeline;
pub mod preprocess;
pub mod report;

pub use assets::AssetMerger;
pub use pipeline::{BuildPipeline, PipelineOutcome, PREPROCESS_FALLBACK_WARNING};
pub use preprocess::{redirect, Preprocessed, Preprocessor};
pub use report::{AppReport, BuildSummary};
