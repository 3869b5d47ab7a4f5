//! Recursive directory copy
//!
//! Per directory level, every file is read and written concurrently and the
//! copies are joined before descending into subdirectories. Each file has a
//! unique destination, so sibling order does not matter. Existing destination
//! files are overwritten.

use std::path::{Path, PathBuf};

use futures::future::{join_all, BoxFuture};
use tracing::{debug, warn};

use crate::domain::entities::{MergeReport, SkippedFile};
use crate::domain::value_objects::CopyPolicy;
use crate::error::{BuildError, BuildResult};

/// Rewrites file contents on their way to the destination
pub type ContentTransform = fn(&Path, Vec<u8>) -> Vec<u8>;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyOptions {
    pub policy: CopyPolicy,
    pub transform: Option<ContentTransform>,
}

impl CopyOptions {
    pub fn new(policy: CopyPolicy) -> Self {
        Self {
            policy,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: ContentTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Copy everything under `source` into `destination`, creating directories on demand.
pub async fn copy_tree(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
) -> BuildResult<MergeReport> {
    let mut report = MergeReport::default();
    if ensure_dir(destination).await? {
        report.directories_created += 1;
    }

    copy_level(
        source.to_path_buf(),
        destination.to_path_buf(),
        Vec::new(),
        options,
        &mut report,
    )
    .await?;

    Ok(report)
}

/// `visited` holds the canonical directories from the root down to `source`;
/// a linked directory resolving to one of them (or above) would never end.
fn copy_level<'a>(
    source: PathBuf,
    destination: PathBuf,
    mut visited: Vec<PathBuf>,
    options: &'a CopyOptions,
    report: &'a mut MergeReport,
) -> BoxFuture<'a, BuildResult<()>> {
    Box::pin(async move {
        visited.push(canonical(&source).await);

        let (files, directories) = match list_dir(&source).await {
            Ok(listing) => listing,
            Err(err) => {
                return skip_or_fail(options, report, &source, err.to_string());
            }
        };

        let copies = files.into_iter().map(|name| {
            let from = source.join(&name);
            let to = destination.join(&name);
            copy_file(from, to, options.transform)
        });

        for result in join_all(copies).await {
            match result {
                Ok(_) => report.files_copied += 1,
                Err(skipped) => skip_or_fail(options, report, &skipped.path, skipped.reason)?,
            }
        }

        for name in directories {
            let from = source.join(&name);
            let target = canonical(&from).await;
            if visited.iter().any(|seen| seen.starts_with(&target)) {
                skip_or_fail(
                    options,
                    report,
                    &from,
                    format!("links back to {}", target.display()),
                )?;
                continue;
            }

            let to = destination.join(&name);
            match ensure_dir(&to).await {
                Ok(created) => {
                    if created {
                        report.directories_created += 1;
                    }
                }
                Err(err) => {
                    skip_or_fail(options, report, &to, err.to_string())?;
                    continue;
                }
            }
            copy_level(from, to, visited.clone(), options, report).await?;
        }

        Ok(())
    })
}

/// Entry names split into files and directories (symlinks followed)
async fn list_dir(dir: &Path) -> std::io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    let mut directories = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = PathBuf::from(entry.file_name());
        match tokio::fs::metadata(entry.path()).await {
            Ok(meta) if meta.is_dir() => directories.push(name),
            // unreadable metadata surfaces as a skipped file when the copy fails
            _ => files.push(name),
        }
    }

    files.sort();
    directories.sort();
    Ok((files, directories))
}

async fn copy_file(
    from: PathBuf,
    to: PathBuf,
    transform: Option<ContentTransform>,
) -> Result<PathBuf, SkippedFile> {
    let contents = tokio::fs::read(&from).await.map_err(|err| SkippedFile {
        path: from.clone(),
        reason: err.to_string(),
    })?;

    let contents = match transform {
        Some(transform) => transform(&from, contents),
        None => contents,
    };

    debug!("CREATE FILE {}", to.display());
    tokio::fs::write(&to, contents)
        .await
        .map_err(|err| SkippedFile {
            path: from,
            reason: err.to_string(),
        })?;

    Ok(to)
}

async fn canonical(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Returns true when the directory did not exist before
async fn ensure_dir(path: &Path) -> BuildResult<bool> {
    if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
        return Ok(false);
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(true)
}

fn skip_or_fail(
    options: &CopyOptions,
    report: &mut MergeReport,
    path: &Path,
    reason: String,
) -> BuildResult<()> {
    if options.policy.is_fail_fast() {
        return Err(BuildError::AssetMergeFailure {
            path: path.to_path_buf(),
            message: reason,
        });
    }

    warn!(path = %path.display(), %reason, "skipping file");
    report.skipped.push(SkippedFile {
        path: path.to_path_buf(),
        reason,
    });
    Ok(())
}

#[cfg(test)]
mod tests;
