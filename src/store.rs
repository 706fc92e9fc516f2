use crate::error::Result;
use crate::types::{FileName, RetrievalOutcome, STAGING_PREFIX};
use bytes::Bytes;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// The node's own directory of files.
///
/// Reads are async and load the whole file. Writes are blocking and are only
/// issued by the cache writer from the blocking pool.
#[derive(Debug, Clone)]
pub struct LocalStore {
    base_dir: PathBuf,
}

impl LocalStore {
    /// Open the store, creating the base directory if it does not exist yet.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            std::fs::create_dir_all(&base_dir)?;
            tracing::info!("Created storage directory {}", base_dir.display());
        }
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Look a file up locally. A missing path, a name the filesystem cannot
    /// hold, or anything that is not a regular file is `NotFound`, not an error.
    pub async fn read(&self, file_name: &FileName) -> Result<RetrievalOutcome> {
        let path = file_name.resolve(&self.base_dir);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if is_absent(&e) => return Ok(RetrievalOutcome::NotFound),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            return Ok(RetrievalOutcome::NotFound);
        }

        match tokio::fs::read(&path).await {
            Ok(content) => Ok(RetrievalOutcome::Found(Bytes::from(content))),
            // Removed between the metadata check and the read
            Err(e) if is_absent(&e) => Ok(RetrievalOutcome::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Create or overwrite `file_name` with `content`.
    ///
    /// Content is staged in a temp file inside the base directory and renamed
    /// into place, so concurrent readers see either the old file or the new one.
    pub fn write(&self, file_name: &FileName, content: &[u8]) -> Result<()> {
        let path = file_name.resolve(&self.base_dir);

        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(&self.base_dir)?;
        staged.write_all(content)?;
        staged.flush()?;
        staged.persist(&path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Errors meaning the path cannot exist locally (ENOENT, ENAMETOOLONG,
/// ENOTDIR). Permission and device errors still surface.
fn is_absent(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::NotFound | ErrorKind::InvalidFilename | ErrorKind::NotADirectory
    )
}
