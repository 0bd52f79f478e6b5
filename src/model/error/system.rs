use macros::traceable;
use std::path::PathBuf;

traceable! {
    SystemError {
        #[error("Failed to read configuration {path}: {err}")]
        ReadConfigFailed { path: PathBuf } => tracing::Level::ERROR,

        #[error("Invalid configuration {path}: {err}")]
        InvalidConfig { path: PathBuf } => tracing::Level::ERROR,

        #[no_source]
        #[error("Invalid configuration value: {key}")]
        InvalidConfigValue { key: String } => tracing::Level::ERROR,

        #[error("Failed to initialize logging: {err}")]
        LoggingInitFailed => tracing::Level::ERROR,

        #[error("Failed to lock state directory {path}: {err}")]
        LockStateFailed { path: PathBuf } => tracing::Level::ERROR,

        #[no_source]
        #[error("State directory {path} is in use by another instance")]
        StateLocked { path: PathBuf } => tracing::Level::ERROR,

        #[no_source]
        #[error("Failed to send shutdown signal")]
        ShutdownSignalFailed => tracing::Level::WARN,

        #[error("Background thread panicked: {err}")]
        ThreadPanic => tracing::Level::ERROR,
    }
}
