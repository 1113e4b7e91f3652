//! Output directory handling.

use crate::error::{BuildError, Result};
use std::path::Path;
use tokio::fs;

/// Remove `path` if it exists and recreate it empty.
///
/// Idempotent: a missing directory is created, an existing one is emptied.
pub async fn reset_dir(path: &Path) -> Result<()> {
    let clean_failed = |source| BuildError::CleanFailed {
        path: path.to_path_buf(),
        source,
    };

    if fs::try_exists(path).await.map_err(clean_failed)? {
        fs::remove_dir_all(path).await.map_err(clean_failed)?;
    }
    fs::create_dir_all(path).await.map_err(clean_failed)?;
    Ok(())
}
