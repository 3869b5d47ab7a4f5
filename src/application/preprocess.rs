//! Comment-stripping preprocessor
//!
//! Copies the source tree into a scratch directory, stripping comments from
//! script files on the way, and tells the pipeline where the entry now lives.
//! Failures are reported as `PreprocessFailure`; the pipeline then keeps
//! building from the original sources.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::entities::MergeReport;
use crate::domain::services::{is_script, strip_comments};
use crate::domain::value_objects::CopyPolicy;
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::fs::{clear_dir, copy_tree, CopyOptions};

/// Result of a successful strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    /// Source path to hand to the backend instead of the original
    pub source: PathBuf,
    pub report: MergeReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Recreate `scratch_dir` as a comment-free copy of `source_dir`.
    pub async fn strip(&self, source_dir: &Path, scratch_dir: &Path) -> BuildResult<MergeReport> {
        let fail = |message: String| BuildError::PreprocessFailure {
            source_dir: source_dir.to_path_buf(),
            message,
        };

        if !source_dir.is_dir() {
            return Err(fail("source directory does not exist".to_string()));
        }
        if scratch_dir.starts_with(source_dir) || source_dir.starts_with(scratch_dir) {
            return Err(fail(format!(
                "scratch directory {} overlaps the source",
                scratch_dir.display()
            )));
        }

        clear_dir(scratch_dir)
            .await
            .map_err(|err| fail(err.to_string()))?;

        let options = CopyOptions::new(CopyPolicy::FailFast).with_transform(strip_script);
        let report = copy_tree(source_dir, scratch_dir, &options)
            .await
            .map_err(|err| match err {
                BuildError::Internal(_) => err,
                other => fail(other.to_string()),
            })?;

        info!(
            files = report.files_copied,
            scratch = %scratch_dir.display(),
            "stripped comments"
        );
        Ok(report)
    }

    /// Strip the tree holding `source` and return the redirected source path.
    ///
    /// A directory source is stripped as a whole; for a file source its parent
    /// directory is stripped and the file's copy becomes the new source.
    pub async fn preprocess(&self, source: &Path, scratch_dir: &Path) -> BuildResult<Preprocessed> {
        let root = if source.is_file() {
            source.parent().unwrap_or(source)
        } else {
            source
        };

        let report = self.strip(root, scratch_dir).await?;
        Ok(Preprocessed {
            source: redirect(source, root, scratch_dir),
            report,
        })
    }
}

/// Map `source` (inside `root`) to the same relative location inside `scratch_dir`.
pub fn redirect(source: &Path, root: &Path, scratch_dir: &Path) -> PathBuf {
    match source.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => scratch_dir.to_path_buf(),
        Ok(relative) => scratch_dir.join(relative),
        Err(_) => scratch_dir.to_path_buf(),
    }
}

/// Content transform: strip script files that are valid UTF-8, pass the rest through.
fn strip_script(path: &Path, contents: Vec<u8>) -> Vec<u8> {
    if !is_script(path) {
        return contents;
    }
    match String::from_utf8(contents) {
        Ok(text) => strip_comments(&text).into_bytes(),
        Err(err) => err.into_bytes(),
    }
}
