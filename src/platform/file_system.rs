use crate::interface::file_system::FileSystemTrait;
use crate::model::error::io::IOError;
use async_trait::async_trait;
use filetime::FileTime;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;

pub struct FileSystem {
    semaphore: Arc<Semaphore>,
}

impl FileSystem {
    pub fn new(semaphore: Arc<Semaphore>) -> Self {
        FileSystem { semaphore }
    }
}

#[async_trait]
impl FileSystemTrait for FileSystem {
    fn semaphore(&self) -> Arc<Semaphore> {
        self.semaphore.clone()
    }

    async fn copy_file(&self, source: &Path, destination: &Path) -> Result<(), IOError> {
        let _permit = self.acquire().await?;
        fs::copy(source, destination)
            .await
            .map_err(|err| IOError::copy_file_failed(source, destination, err))?;

        // Carry access and modification time over so the next pass sees equal timestamps
        let metadata = fs::metadata(source)
            .await
            .map_err(|err| IOError::copy_file_failed(source, destination, err))?;
        let accessed = FileTime::from_last_access_time(&metadata);
        let modified = FileTime::from_last_modification_time(&metadata);
        let target = destination.to_path_buf();
        tokio::task::spawn_blocking(move || filetime::set_file_times(&target, accessed, modified))
            .await
            .map_err(|err| IOError::copy_file_failed(source, destination, err))?
            .map_err(|err| {
                let err = IOError::set_metadata_failed(destination, err);
                IOError::copy_file_failed(source, destination, err)
            })?;
        Ok(())
    }
}
