use crate::core::backup::comparator::{FileStatus, PathTimeComparator};
use crate::core::backup::tree_walker::{TreeWalker, WalkError};
use crate::core::io_manager::IOManager;
use crate::interface::file_system::FileSystemTrait;
use crate::model::backup_result::BackupResult;
use crate::model::config::CopyPolicy;
use crate::model::error::backup::BackupError;
use crate::model::error::io::IOError;
use chrono::Local;
use macros::log;
use std::path::Path;
use std::sync::Arc;

pub struct BackupExecutor {
    io_manager: Arc<IOManager>,
    comparator: PathTimeComparator,
    copy_policy: CopyPolicy,
}

#[derive(Default)]
struct Counters {
    copied_files: usize,
    modified_files: usize,
    copied_folders: usize,
    modified_folders: usize,
    errors: Vec<String>,
}

impl BackupExecutor {
    pub fn new(io_manager: Arc<IOManager>, copy_policy: CopyPolicy) -> Self {
        Self {
            comparator: PathTimeComparator::new(io_manager.clone()),
            io_manager,
            copy_policy,
        }
    }

    /// Execute pass. `on_progress` receives one percentage per processed file.
    /// Per-file failures end up in the result; anything else aborts the run.
    pub async fn execute(
        &self,
        source_root: &Path,
        destination_root: &Path,
        on_progress: impl Fn(u8) + Send + Sync,
    ) -> Result<BackupResult, BackupError> {
        if !self.io_manager.is_directory(destination_root).await {
            return Err(BackupError::destination_unreachable(destination_root));
        }

        let total_files = TreeWalker::count_files(self.io_manager.clone(), source_root)
            .await
            .map_err(|failure| Self::walk_failure(source_root, failure))?;

        let mut counters = Counters::default();
        let mut processed = 0usize;
        let mut last_percent = 0u8;
        let mut walker = TreeWalker::new(self.io_manager.clone(), source_root);

        while let Some(visit) = walker.next_directory().await {
            let visit = visit.map_err(|failure| Self::walk_failure(source_root, failure))?;

            if !self.io_manager.is_directory(destination_root).await {
                return Err(BackupError::destination_unreachable(destination_root));
            }

            let destination_directory = visit.mirror(destination_root);
            if self.io_manager.is_directory(&destination_directory).await {
                counters.modified_folders += 1;
            } else {
                self.io_manager
                    .create_directory(&destination_directory)
                    .await
                    .map_err(|err| BackupError::create_folder_failed(&destination_directory, err))?;
                counters.copied_folders += 1;
            }

            for file in &visit.files {
                let Some(name) = file.file_name() else {
                    continue;
                };
                let destination = destination_directory.join(name);
                if let Err(err) = self.process_file(file, &destination, &mut counters).await {
                    log!(err);
                    counters.errors.push(err.to_string());
                }

                processed += 1;
                last_percent = Self::percent(processed, total_files);
                on_progress(last_percent);
            }
        }

        // Files removed between counting and copying leave the tail short of 100
        if processed > 0 && last_percent < 100 {
            on_progress(100);
        }

        Ok(BackupResult {
            date: Local::now().naive_local(),
            copied_files: counters.copied_files,
            modified_files: counters.modified_files,
            copied_folders: counters.copied_folders,
            modified_folders: counters.modified_folders,
            source: source_root.to_path_buf(),
            destination: destination_root.to_path_buf(),
            errors: counters.errors,
        })
    }

    async fn process_file(&self, source: &Path, destination: &Path, counters: &mut Counters) -> Result<(), IOError> {
        let status = self
            .comparator
            .compare(source, destination)
            .await
            .map_err(|err| IOError::copy_file_failed(source, destination, err))?
            .status;

        let should_copy = match self.copy_policy {
            CopyPolicy::OverwriteOnVisit => true,
            CopyPolicy::SkipUnchanged => status != FileStatus::Unchanged,
        };
        if !should_copy {
            return Ok(());
        }

        self.io_manager.copy_file(source, destination).await?;
        match status {
            FileStatus::New => counters.copied_files += 1,
            FileStatus::Modified => counters.modified_files += 1,
            FileStatus::Unchanged => {}
        }
        Ok(())
    }

    fn percent(processed: usize, total: usize) -> u8 {
        if total == 0 {
            return 100;
        }
        (processed.saturating_mul(100) / total).min(100) as u8
    }

    fn walk_failure(source_root: &Path, failure: WalkError) -> BackupError {
        if failure.is_root() {
            BackupError::source_unreachable(source_root, failure.error)
        } else {
            BackupError::walk_failed(failure.directory, failure.error)
        }
    }
}
