use crate::model::error::system::SystemError;
use fs4::tokio::AsyncFileExt;
use std::path::Path;
use tokio::fs::{File, OpenOptions};

/// Exclusive advisory lock on a file, released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
}

impl FileLock {
    pub async fn acquire(path: impl AsRef<Path>) -> Result<Self, SystemError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .await
            .map_err(|err| SystemError::lock_state_failed(&path, err))?;

        let locked = AsyncFileExt::try_lock_exclusive(&file)
            .map_err(|err| SystemError::lock_state_failed(&path, err))?;
        if !locked {
            return Err(SystemError::state_locked(&path));
        }
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = AsyncFileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn second_holder_is_rejected_until_release() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("treesync.lock");

        let first = FileLock::acquire(&path).await.unwrap();
        let err = FileLock::acquire(&path).await.unwrap_err();
        assert_eq!(err, SystemError::state_locked(&path));

        drop(first);
        assert!(FileLock::acquire(&path).await.is_ok());
    }
}
