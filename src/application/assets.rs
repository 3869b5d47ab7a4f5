//! Asset merger
//!
//! Overlays the layers of a `MergePlan` into one destination directory.
//! Layers are applied strictly one after another so a later layer always
//! wins over an earlier one; inside a layer the copy runs concurrently.

use std::path::Path;

use tracing::debug;

use crate::domain::entities::{MergePlan, MergeReport};
use crate::domain::value_objects::CopyPolicy;
use crate::error::BuildResult;
use crate::infrastructure::fs::{copy_tree, CopyOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetMerger {
    options: CopyOptions,
}

impl AssetMerger {
    pub fn new(policy: CopyPolicy) -> Self {
        Self {
            options: CopyOptions::new(policy),
        }
    }

    /// Apply every layer of `plan` to `destination`.
    ///
    /// Layers whose root does not exist are skipped without error, so an
    /// empty plan (or one with only missing layers) writes nothing.
    pub async fn merge(&self, plan: &MergePlan, destination: &Path) -> BuildResult<MergeReport> {
        let mut report = MergeReport::default();

        for layer in plan.layers() {
            let exists = tokio::fs::metadata(layer.root())
                .await
                .is_ok_and(|meta| meta.is_dir());
            if !exists {
                debug!(layer = layer.name(), "asset layer missing, skipped");
                continue;
            }

            let applied = copy_tree(layer.root(), destination, &self.options).await?;
            report.absorb(applied);
            report.layers_applied.push(layer.name().to_string());
        }

        Ok(report)
    }
}
