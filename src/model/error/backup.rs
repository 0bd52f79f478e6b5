use macros::traceable;
use std::path::PathBuf;

traceable! {
    BackupError {
        #[no_source]
        #[error("Both source and destination directories must be set.")]
        MissingPath => tracing::Level::WARN,

        #[no_source]
        #[error("Destination directory is not reachable: {path}")]
        DestinationUnreachable { path: PathBuf } => tracing::Level::ERROR,

        #[error("Source directory is not reachable: {path}: {err}")]
        SourceUnreachable { path: PathBuf } => tracing::Level::ERROR,

        #[no_source]
        #[error("A backup into {path} is already running")]
        RunInProgress { path: PathBuf } => tracing::Level::WARN,

        #[error("Failed to walk {path}: {err}")]
        WalkFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to create destination folder {path}: {err}")]
        CreateFolderFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Backup worker stopped unexpectedly: {err}")]
        WorkerPanic => tracing::Level::ERROR,
    }
}
