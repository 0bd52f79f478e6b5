use crate::core::io_manager::IOManager;
use crate::interface::file_system::FileSystemTrait;
use crate::model::error::io::IOError;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    New,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileComparison {
    pub status: FileStatus,
    pub size: u64,
}

/// Decides whether a source file needs copying from existence and modification time only.
#[derive(Clone)]
pub struct PathTimeComparator {
    io_manager: Arc<IOManager>,
}

impl PathTimeComparator {
    pub fn new(io_manager: Arc<IOManager>) -> Self {
        Self { io_manager }
    }

    pub fn classify(source_modified: SystemTime, destination_modified: Option<SystemTime>) -> FileStatus {
        match destination_modified {
            None => FileStatus::New,
            Some(destination_modified) if source_modified > destination_modified => {
                FileStatus::Modified
            }
            Some(_) => FileStatus::Unchanged,
        }
    }

    pub async fn compare(&self, source: &Path, destination: &Path) -> Result<FileComparison, IOError> {
        let source_metadata = self.io_manager.metadata(source).await?;
        let source_modified = source_metadata
            .modified()
            .map_err(|err| IOError::get_metadata_failed(source, err))?;

        let destination_modified = if self.io_manager.exists(destination).await {
            let destination_metadata = self.io_manager.metadata(destination).await?;
            let modified = destination_metadata
                .modified()
                .map_err(|err| IOError::get_metadata_failed(destination, err))?;
            Some(modified)
        } else {
            None
        };

        Ok(FileComparison {
            status: Self::classify(source_modified, destination_modified),
            size: source_metadata.len(),
        })
    }
}
