use crate::core::io_manager::IOManager;
use crate::interface::file_system::FileSystemTrait;
use crate::model::entry::EntryKind;
use crate::model::error::io::IOError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One visited source directory with the files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryVisit {
    pub directory: PathBuf,
    pub relative: PathBuf,
    pub files: Vec<PathBuf>,
}

impl DirectoryVisit {
    /// The directory mirrored under another root.
    pub fn mirror(&self, root: &Path) -> PathBuf {
        if self.relative.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.relative)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkError {
    pub directory: PathBuf,
    pub relative: PathBuf,
    pub error: IOError,
}

impl WalkError {
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }
}

/// Top-down depth-first walk: a directory is yielded before its subdirectories,
/// siblings in name order.
pub struct TreeWalker {
    io_manager: Arc<IOManager>,
    stack: Vec<(PathBuf, PathBuf)>,
}

impl TreeWalker {
    pub fn new(io_manager: Arc<IOManager>, root: &Path) -> Self {
        Self {
            io_manager,
            stack: vec![(root.to_path_buf(), PathBuf::new())],
        }
    }

    pub async fn next_directory(&mut self) -> Option<Result<DirectoryVisit, WalkError>> {
        let (directory, relative) = self.stack.pop()?;
        let entries = match self.io_manager.list_directory(&directory).await {
            Ok(entries) => entries,
            Err(error) => {
                return Some(Err(WalkError {
                    directory,
                    relative,
                    error,
                }));
            }
        };

        let mut files = Vec::new();
        let mut subdirectories = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::File => files.push(entry.path),
                EntryKind::Directory => {
                    let Some(name) = entry.path.file_name() else {
                        continue;
                    };
                    let child_relative = relative.join(name);
                    subdirectories.push((entry.path, child_relative));
                }
            }
        }
        self.stack.extend(subdirectories.into_iter().rev());

        Some(Ok(DirectoryVisit {
            directory,
            relative,
            files,
        }))
    }

    /// Number of files under `root`, failing on the first unreadable directory.
    pub async fn count_files(io_manager: Arc<IOManager>, root: &Path) -> Result<usize, WalkError> {
        let mut walker = Self::new(io_manager, root);
        let mut total = 0;
        while let Some(visit) = walker.next_directory().await {
            total += visit?.files.len();
        }
        Ok(total)
    }
}
