use macros::traceable;
use std::path::PathBuf;

traceable! {
    IOError {
        #[no_source]
        #[error("File operation semaphore has been closed")]
        SemaphoreClosed => tracing::Level::ERROR,

        #[error("Failed to read directory {path}: {err}")]
        ReadDirectoryFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to create directory {path}: {err}")]
        CreateDirectoryFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Error copying {src} to {dst}: {err}")]
        CopyFileFailed { src: PathBuf, dst: PathBuf } => tracing::Level::WARN,

        #[error("Failed to get metadata of {path}: {err}")]
        GetMetadataFailed { path: PathBuf } => tracing::Level::WARN,

        #[error("Failed to set timestamps of {path}: {err}")]
        SetMetadataFailed { path: PathBuf } => tracing::Level::WARN,

        #[error("Failed to read file {path}: {err}")]
        ReadFileFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to write file {path}: {err}")]
        WriteFileFailed { path: PathBuf } => tracing::Level::ERROR,
    }
}
