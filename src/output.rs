//! Filesystem output helpers shared by artifact and asset tasks.

use std::path::Path;

use tracing::{debug, error, info};

use crate::error::SyncError;

/// Creates `path` and all missing ancestors, succeeding silently when the
/// path already exists. Must complete before anything is written into it.
pub async fn ensure_dir(path: &Path) -> Result<(), SyncError> {
    tokio::fs::create_dir_all(path).await.map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to create output directory");
        SyncError::FileSystem(e)
    })?;
    debug!(path = %path.display(), "Ensured output directory");
    Ok(())
}

/// Ensures `dir` exists, then writes `contents` to `dir/filename`,
/// replacing any previous artifact. Every run fully regenerates its output.
pub async fn write_artifact(dir: &Path, filename: &str, contents: &str) -> Result<(), SyncError> {
    ensure_dir(dir).await?;
    let path = dir.join(filename);
    tokio::fs::write(&path, contents).await.map_err(|e| {
        error!(error = ?e, path = %path.display(), "Failed to write stylesheet artifact");
        SyncError::FileSystem(e)
    })?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote stylesheet artifact");
    Ok(())
}
