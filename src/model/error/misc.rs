use macros::traceable;
use std::path::PathBuf;

traceable! {
    MiscError {
        #[error("Failed to serialize {path}: {err}")]
        SerializeError { path: PathBuf } => tracing::Level::ERROR,

        #[error("Failed to deserialize {path}: {err}")]
        DeserializeError { path: PathBuf } => tracing::Level::ERROR,
    }
}
