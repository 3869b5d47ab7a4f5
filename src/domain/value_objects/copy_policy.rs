//! Copy Policy Value Object
//!
//! Decides what a recursive copy does when a single file cannot be copied.

use serde::{Deserialize, Serialize};

/// Per-file error handling for recursive copies
///
/// - `BestEffort`: log the file, skip it, keep copying (default)
/// - `FailFast`: abort the copy on the first unreadable or unwritable file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CopyPolicy {
    #[default]
    BestEffort,
    FailFast,
}

impl CopyPolicy {
    pub fn is_fail_fast(&self) -> bool {
        matches!(self, CopyPolicy::FailFast)
    }
}
