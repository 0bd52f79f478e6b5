use macros::traceable;

traceable! {
    TaskError {
        #[no_source]
        #[error("Task name must be set.")]
        EmptyTaskName => tracing::Level::WARN,

        #[no_source]
        #[error("Task {name} not found.")]
        TaskNotFound { name: String } => tracing::Level::WARN,
    }
}
