use macros::loggable;
use std::path::PathBuf;

loggable! {
    SystemLog {
        #[error("Initializing")]
        Initializing => tracing::Level::INFO,

        #[error("Initialization completed")]
        InitializeComplete => tracing::Level::INFO,

        #[error("Configuration not found at {path}, using defaults")]
        ConfigDefaulted { path: PathBuf } => tracing::Level::WARN,

        #[error("Online now")]
        Online => tracing::Level::INFO,

        #[error("Termination in process")]
        Terminating => tracing::Level::INFO,

        #[error("Termination completed")]
        TerminateComplete => tracing::Level::INFO,
    }
}
