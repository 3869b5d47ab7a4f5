//! Writing in-memory compile results

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::entities::Artifact;
use crate::error::{BuildError, BuildResult};

use super::clear_dir;

/// Clear `output_dir`, then write `artifact` as `<output_dir>/<app>.<ext>`.
///
/// Stale output is never merged with a fresh artifact.
pub async fn write_artifact(output_dir: &Path, app: &str, artifact: &Artifact) -> BuildResult<PathBuf> {
    clear_dir(output_dir).await?;

    let path = output_dir.join(artifact.file_name(app));
    let target = path.clone();
    let contents = artifact.contents().to_vec();
    tokio::task::spawn_blocking(move || write_atomic(&target, &contents))
        .await
        .map_err(|err| BuildError::Internal(format!("artifact writer stopped: {}", err)))??;
    debug!(path = %path.display(), bytes = artifact.contents().len(), "wrote artifact");

    Ok(path)
}

/// Temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
