//! Path-addressed blob storage for raw feed responses.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Clone, Debug)]
pub struct FileArchive {
    root: PathBuf,
}

impl FileArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Write `content` under `relative_path`. The file is synced to disk and
    /// moved into place in one rename, so readers never see a partial body.
    pub async fn save(&self, relative_path: &str, content: &[u8]) -> io::Result<PathBuf> {
        let path = self.resolve(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = path.with_extension("json.partial");
        if let Err(e) = write_synced(&tmp_path, &path, content).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "Failed to remove partial archive file"
                    );
                }
            }
            return Err(e);
        }

        tracing::debug!(path = %path.display(), bytes = content.len(), "Archived feed content");
        Ok(path)
    }

    pub async fn load(&self, relative_path: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(relative_path)).await
    }
}

async fn write_synced(tmp_path: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp_path).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(tmp_path, path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path());

        let path = archive
            .save("anss/magnitude-over-1/geojson/one-hour/a.json", b"{\"a\": 1}")
            .await
            .unwrap();

        assert!(path.starts_with(dir.path()));
        assert!(!path.with_extension("json.partial").exists());
        assert_eq!(
            archive
                .load("anss/magnitude-over-1/geojson/one-hour/a.json")
                .await
                .unwrap(),
            b"{\"a\": 1}"
        );
    }

    #[tokio::test]
    async fn test_failed_save_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path());

        // A non-empty directory at the target path makes the final rename fail
        let target = dir.path().join("anss/b.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();

        assert!(archive.save("anss/b.json", b"{\"b\": 2}").await.is_err());
        assert!(!target.with_extension("json.partial").exists());
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let archive = FileArchive::new(dir.path());

        let err = archive.load("anss/missing.json").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
