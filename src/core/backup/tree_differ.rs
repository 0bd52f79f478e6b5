use crate::core::backup::comparator::{FileStatus, PathTimeComparator};
use crate::core::backup::tree_walker::TreeWalker;
use crate::core::io_manager::IOManager;
use crate::interface::file_system::FileSystemTrait;
use crate::model::diff_report::{DiffKind, DiffReport};
use crate::model::error::backup::BackupError;
use macros::log;
use std::path::Path;
use std::sync::Arc;

/// Read-only diff pass. Never creates, copies or opens anything.
pub struct TreeDiffer {
    io_manager: Arc<IOManager>,
    comparator: PathTimeComparator,
}

impl TreeDiffer {
    pub fn new(io_manager: Arc<IOManager>) -> Self {
        Self {
            comparator: PathTimeComparator::new(io_manager.clone()),
            io_manager,
        }
    }

    pub async fn diff(&self, source_root: &Path, destination_root: &Path) -> Result<DiffReport, BackupError> {
        let mut report = DiffReport::default();
        let mut walker = TreeWalker::new(self.io_manager.clone(), source_root);

        while let Some(visit) = walker.next_directory().await {
            let visit = match visit {
                Ok(visit) => visit,
                Err(failure) if failure.is_root() => {
                    return Err(BackupError::source_unreachable(source_root, failure.error));
                }
                Err(failure) => {
                    log!(failure.error);
                    continue;
                }
            };

            let destination_directory = visit.mirror(destination_root);
            if !self.io_manager.is_directory(&destination_directory).await {
                report.push(DiffKind::NewFolder, destination_directory.clone(), 0);
            }

            for file in &visit.files {
                let Some(name) = file.file_name() else {
                    continue;
                };
                let destination = destination_directory.join(name);
                match self.comparator.compare(file, &destination).await {
                    Ok(comparison) => match comparison.status {
                        FileStatus::New => report.push(DiffKind::NewFile, destination, comparison.size),
                        FileStatus::Modified => {
                            report.push(DiffKind::ModifiedFile, destination, comparison.size)
                        }
                        FileStatus::Unchanged => {}
                    },
                    Err(err) => log!(err),
                }
            }
        }

        Ok(report)
    }
}
