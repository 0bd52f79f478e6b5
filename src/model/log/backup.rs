use macros::loggable;
use std::path::PathBuf;

loggable! {
    BackupLog {
        #[error("Backup started: {src} -> {dst}")]
        RunStarted { src: PathBuf, dst: PathBuf } => tracing::Level::INFO,

        #[error("Waiting for the running backup into {path}")]
        WaitingForDestination { path: PathBuf } => tracing::Level::INFO,

        #[error("No changes detected.")]
        NoChanges => tracing::Level::INFO,

        #[error("Backup completed successfully.")]
        Completed => tracing::Level::INFO,

        #[error("Backup completed with {count} error(s)")]
        CompletedWithErrors { count: usize } => tracing::Level::WARN,
    }
}
