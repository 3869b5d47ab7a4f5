//! Domain Entities
//!
//! - `Stage` / `StageResult` - outcome of one pipeline phase
//! - `CompiledOutput` - what a backend hands back after compiling
//! - `MergePlan` - ordered asset layers overlaid into one destination

mod compiled;
mod merge_plan;
mod stage;

pub use compiled::{Artifact, CompiledOutput};
pub use merge_plan::{AssetTree, MergePlan, MergeReport, SkippedFile, COMMON_LAYER};
pub use stage::{Stage, StageFailure, StageReport, StageResult};
