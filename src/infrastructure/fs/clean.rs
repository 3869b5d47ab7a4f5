//! Output directory clearing

use std::io;
use std::path::Path;

/// Recursively delete `path` and recreate it empty.
///
/// A missing directory is simply created.
pub async fn clear_dir(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    tokio::fs::create_dir_all(path).await
}
