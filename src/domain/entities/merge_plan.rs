//! Merge plan - ordered asset layers overlaid into one destination
//!
//! Layers are applied in order: a file from a later layer replaces the file
//! at the same relative path written by an earlier layer.

use std::path::{Path, PathBuf};

/// Directory name of the layer applied to every environment
pub const COMMON_LAYER: &str = "common";

/// A directory subtree identified only by its root path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTree {
    name: String,
    root: PathBuf,
}

impl AssetTree {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Ordered list of layers to overlay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    layers: Vec<AssetTree>,
}

impl MergePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<assets>/common` then `<assets>/<environment>`
    pub fn for_environment(assets_root: &Path, environment: &str) -> Self {
        Self::new()
            .with_layer(AssetTree::new(COMMON_LAYER, assets_root.join(COMMON_LAYER)))
            .with_layer(AssetTree::new(environment, assets_root.join(environment)))
    }

    pub fn with_layer(mut self, layer: AssetTree) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(&self) -> &[AssetTree] {
        &self.layers
    }
}

/// A source file that could not be copied under best-effort policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Counters collected while applying a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub layers_applied: Vec<String>,
    pub files_copied: usize,
    pub directories_created: usize,
    pub skipped: Vec<SkippedFile>,
}

impl MergeReport {
    pub fn absorb(&mut self, other: MergeReport) {
        self.layers_applied.extend(other.layers_applied);
        self.files_copied += other.files_copied;
        self.directories_created += other.directories_created;
        self.skipped.extend(other.skipped);
    }
}
