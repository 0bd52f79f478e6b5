use crate::model::config::Config;
use crate::platform::file_system::FileSystem;
use std::ops::Deref;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared file system handle. Every operation holds one of `max_file_operations` permits.
pub struct IOManager {
    semaphore: Arc<Semaphore>,
    file_system: FileSystem,
}

impl IOManager {
    pub fn new(config: &Config) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_file_operations));
        Self {
            semaphore: semaphore.clone(),
            file_system: FileSystem::new(semaphore),
        }
    }

    /// Pending and future operations fail with `SemaphoreClosed` afterwards.
    pub fn terminate(&self) {
        self.semaphore.close();
    }
}

impl Deref for IOManager {
    type Target = FileSystem;

    fn deref(&self) -> &Self::Target {
        &self.file_system
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::file_system::FileSystemTrait;
    use crate::model::entry::EntryKind;
    use crate::model::error::io::IOError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn lists_directory_sorted_by_name() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let io_manager = IOManager::new(&Config::default());
        let entries = io_manager.list_directory(dir.path()).await.unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
        assert_eq!(entries[2].kind, EntryKind::Directory);
    }

    #[tokio::test]
    async fn canonical_path_collapses_aliases() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let io_manager = IOManager::new(&Config::default());

        let direct = io_manager.canonical_path(dir.path()).await;
        let aliased = io_manager.canonical_path(&dir.path().join("sub").join("..")).await;
        assert_eq!(direct, aliased);

        let missing = dir.path().join("missing");
        assert_eq!(io_manager.canonical_path(&missing).await, missing);
    }

    #[tokio::test]
    async fn terminate_rejects_further_operations() {
        let dir = tempdir().unwrap();
        let io_manager = IOManager::new(&Config::default());
        io_manager.terminate();

        let err = io_manager.list_directory(dir.path()).await.unwrap_err();
        assert_eq!(err, IOError::SemaphoreClosed);
    }
}
