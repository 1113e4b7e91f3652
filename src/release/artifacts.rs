//! Artifact discovery in the distribution directory.

use crate::error::{Result, UploadError};
use std::path::{Path, PathBuf};

/// A file to attach to the release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Asset name (the file name)
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
}

/// List the regular files directly inside `dir`, in directory-listing order.
///
/// Subdirectories, broken links and special files are skipped; symlinks to
/// regular files are included. A file name that is not valid UTF-8 is
/// uploaded under its lossy conversion.
pub async fn collect_artifacts(dir: &Path) -> Result<Vec<Artifact>> {
    let list_failed = |source| UploadError::ListFailed {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(list_failed)?;
    let mut artifacts = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
        let path = entry.path();
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            _ => {
                log::debug!("Skipping non-file entry {}", path.display());
                continue;
            }
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                let name = raw.to_string_lossy().into_owned();
                log::warn!("Artifact {} has a non UTF-8 name, uploading as '{name}'", path.display());
                name
            }
        };
        artifacts.push(Artifact { name, path });
    }

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;

    #[tokio::test]
    async fn only_regular_files_are_collected() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("a.zip"), b"zip").unwrap();
        std::fs::write(temp.path().join("b.txt"), b"txt").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub/nested.zip"), b"nested").unwrap();

        let mut names: Vec<String> = collect_artifacts(temp.path())
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.zip", "b.txt"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_follow_their_target() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("real.zip");
        std::fs::write(&target, b"zip").unwrap();
        let dist = temp.path().join("dist");
        std::fs::create_dir(&dist).unwrap();
        std::os::unix::fs::symlink(&target, dist.join("linked.zip")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), dist.join("broken.zip")).unwrap();

        let artifacts = collect_artifacts(&dist).await.unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].name, "linked.zip");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_utf8_name_does_not_hide_other_files() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("a.zip"), b"zip").unwrap();
        let raw = temp.path().join(OsStr::from_bytes(b"b\xff.zip"));
        if std::fs::write(&raw, b"raw").is_err() {
            // Filesystem refuses non UTF-8 names
            return;
        }

        let mut artifacts = collect_artifacts(temp.path()).await.unwrap();
        artifacts.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].name, "a.zip");
        assert_eq!(artifacts[1].name, "b\u{FFFD}.zip");
        assert_eq!(artifacts[1].path, raw);
    }

    #[tokio::test]
    async fn missing_directory_is_an_upload_error() {
        let temp = tempfile::tempdir().unwrap();

        let err = collect_artifacts(&temp.path().join("dist")).await.unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::Upload(UploadError::ListFailed { .. })
        ));
    }
}
