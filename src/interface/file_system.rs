use crate::model::entry::{DirectoryEntry, EntryKind};
use crate::model::error::io::IOError;
use async_trait::async_trait;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;

#[async_trait]
pub trait FileSystemTrait: Send + Sync {
    fn semaphore(&self) -> Arc<Semaphore>;

    async fn acquire(&self) -> Result<OwnedSemaphorePermit, IOError> {
        self.semaphore()
            .acquire_owned()
            .await
            .map_err(|_| IOError::SemaphoreClosed)
    }

    /// Lists a directory sorted by name. Symlinks to directories are not followed
    /// and left out; every other non-directory entry is reported as a file.
    async fn list_directory(&self, path: &Path) -> Result<Vec<DirectoryEntry>, IOError> {
        let _permit = self.acquire().await?;
        let reader = fs::read_dir(path)
            .await
            .map_err(|err| IOError::read_directory_failed(path, err))?;
        let mut entries = ReadDirStream::new(reader);
        let mut result = Vec::new();
        while let Some(entry) = entries.next().await {
            let entry = entry.map_err(|err| IOError::read_directory_failed(path, err))?;
            let entry_path = entry.path();
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(_) => {
                    result.push(DirectoryEntry {
                        path: entry_path,
                        kind: EntryKind::File,
                    });
                    continue;
                }
            };
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_symlink() {
                match fs::metadata(&entry_path).await {
                    Ok(metadata) if metadata.is_dir() => continue,
                    _ => EntryKind::File,
                }
            } else {
                EntryKind::File
            };
            result.push(DirectoryEntry {
                path: entry_path,
                kind,
            });
        }
        result.sort_by(|left, right| left.path.file_name().cmp(&right.path.file_name()));
        Ok(result)
    }

    async fn create_directory(&self, path: &Path) -> Result<(), IOError> {
        let _permit = self.acquire().await?;
        fs::create_dir_all(path)
            .await
            .map_err(|err| IOError::create_directory_failed(path, err))
    }

    async fn metadata(&self, path: &Path) -> Result<Metadata, IOError> {
        let _permit = self.acquire().await?;
        fs::metadata(path)
            .await
            .map_err(|err| IOError::get_metadata_failed(path, err))
    }

    async fn exists(&self, path: &Path) -> bool {
        let Ok(_permit) = self.acquire().await else {
            return false;
        };
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn is_directory(&self, path: &Path) -> bool {
        let Ok(_permit) = self.acquire().await else {
            return false;
        };
        fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }

    /// Resolves symlinks and relative components; paths that do not exist come back unchanged.
    async fn canonical_path(&self, path: &Path) -> PathBuf {
        let Ok(_permit) = self.acquire().await else {
            return path.to_path_buf();
        };
        fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf())
    }

    /// Copies content and carries the source timestamps over to the destination.
    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<(), IOError>;
}
