//! Asset bundle synchronisation: stream a zip bundle from the API into a
//! scoped temporary file and unpack it into the kind's target folder.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};

use crate::api::ParlorApi;
use crate::error::SyncError;
use crate::output::ensure_dir;

/// A downloadable binary bundle category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Fonts,
    Images,
}

impl AssetKind {
    /// Canonical subfolder the bundle unpacks into.
    pub fn dir_name(self) -> &'static str {
        match self {
            AssetKind::Fonts => "fonts",
            AssetKind::Images => "images",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Resolves the directory a bundle unpacks into.
///
/// A target that already ends in the kind's folder name is not nested a
/// second time: `out/fonts` and `out` both resolve to `out/fonts`.
fn bundle_dir(kind: AssetKind, target: &Path) -> PathBuf {
    let base = match target.file_name().and_then(|n| n.to_str()) {
        Some(name) if name == kind.dir_name() => target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        _ => target.to_path_buf(),
    };
    base.join(kind.dir_name())
}

/// Downloads and unpacks the bundle for `kind` under `target`.
///
/// The task is strictly sequential: ensure the directory, stream the archive
/// into a temporary file inside it, extract over existing files, drop the
/// temporary file. The temp file handle owns its file, so it is removed on
/// every exit path, failures included. No retry, no mid-flight cancellation:
/// a stalled stream blocks this task until the connection dies.
pub async fn sync_assets<A>(api: &A, kind: AssetKind, target: &Path) -> Result<(), SyncError>
where
    A: ParlorApi + ?Sized,
{
    let dest = bundle_dir(kind, target);
    ensure_dir(&dest).await?;

    let mut stream = api.fetch_bundle(kind).await?;

    let archive = tempfile::Builder::new()
        .prefix(".parlor-bundle-")
        .suffix(".zip")
        .tempfile_in(&dest)
        .map_err(|e| {
            error!(error = ?e, dest = %dest.display(), "Failed to create temporary archive file");
            SyncError::FileSystem(e)
        })?;

    let mut file = tokio::fs::File::from_std(archive.reopen().map_err(SyncError::FileSystem)?);
    let mut total: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            error!(error = %e, kind = %kind, "Bundle stream failed mid-download");
            SyncError::Network(e.to_string())
        })?;
        total += chunk.len() as u64;
        file.write_all(&chunk).await.map_err(|e| {
            error!(error = ?e, kind = %kind, "Failed to write bundle chunk to disk");
            SyncError::FileSystem(e)
        })?;
    }
    file.flush().await.map_err(SyncError::FileSystem)?;
    debug!(kind = %kind, bytes = total, "Bundle download complete");

    // Zip extraction is blocking I/O; run it off the async scheduler.
    let archive_path = archive.path().to_path_buf();
    let extract_dest = dest.clone();
    tokio::task::spawn_blocking(move || extract_archive(&archive_path, &extract_dest))
        .await
        .map_err(|e| SyncError::FileSystem(io::Error::new(io::ErrorKind::Other, e)))??;

    info!(kind = %kind, dest = %dest.display(), "Unpacked asset bundle");
    Ok(())
}

/// Unpacks the zip at `archive` into `dest`, overwriting same-named files.
fn extract_archive(archive: &Path, dest: &Path) -> Result<(), SyncError> {
    let file = std::fs::File::open(archive).map_err(SyncError::FileSystem)?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| {
        error!(error = %e, archive = %archive.display(), "Bundle is not a readable zip archive");
        SyncError::FileSystem(io::Error::new(io::ErrorKind::InvalidData, e))
    })?;
    zip.extract(dest).map_err(|e| {
        error!(error = %e, dest = %dest.display(), "Failed to extract bundle");
        SyncError::FileSystem(io::Error::new(io::ErrorKind::Other, e))
    })
}
